use anyhow::{Context, Result, bail};
use futures::stream::{self, StreamExt};
use std::io::{self, BufRead};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use crate::constants::STDIN_PATH;
use crate::output::{CSV_HEADER, ProbeRecord, format_output};
use crate::probe::{ProbeOptions, ProbeOutcome, probe};
use crate::types::{OutputArgs, OutputFormat, ProbeArgs};
use crate::utils::{NormalizedUrl, normalize};

/// How a probed URL is labelled in the results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Host,
    FullUrl,
}

impl DisplayMode {
    pub fn from_full_urls(full_urls: bool) -> Self {
        if full_urls {
            DisplayMode::FullUrl
        } else {
            DisplayMode::Host
        }
    }

    pub fn label(self, url: &NormalizedUrl) -> String {
        match self {
            DisplayMode::Host => url.host().to_string(),
            DisplayMode::FullUrl => url.as_str().to_string(),
        }
    }
}

/// One probed line of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub label: String,
    pub url: NormalizedUrl,
    pub outcome: ProbeOutcome,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("no input lines were given")]
    NoInput,
    #[error("none of the {lines_read} input lines is a valid address")]
    NoValidUrls { lines_read: usize },
    #[error("concurrency must be greater than zero")]
    ZeroConcurrency,
}

/// Probe every normalizable line, in input order.
///
/// Lines that do not normalize are dropped. A failed probe is recorded in
/// its entry and never stops the remaining probes. At most `concurrency`
/// probes are in flight; entries keep input order either way.
pub async fn run_batch<S: AsRef<str>>(
    lines: &[S],
    options: &ProbeOptions,
    display: DisplayMode,
    concurrency: usize,
) -> Result<Vec<BatchEntry>, BatchError> {
    if concurrency == 0 {
        return Err(BatchError::ZeroConcurrency);
    }
    if lines.is_empty() {
        return Err(BatchError::NoInput);
    }

    let urls: Vec<NormalizedUrl> = lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let normalized = normalize(line.as_ref());
            if normalized.is_none() {
                debug!(line = idx + 1, "skipping line that is not a valid address");
            }
            normalized
        })
        .collect();

    if urls.is_empty() {
        return Err(BatchError::NoValidUrls {
            lines_read: lines.len(),
        });
    }

    info!(
        targets = urls.len(),
        skipped = lines.len() - urls.len(),
        concurrency,
        "starting batch"
    );

    let entries: Vec<BatchEntry> = stream::iter(urls)
        .map(|url| async move {
            let outcome = probe(&url, options).await;
            BatchEntry {
                label: display.label(&url),
                url,
                outcome,
            }
        })
        .buffered(concurrency)
        .collect()
        .await;

    Ok(entries)
}

/// Read candidate lines from a file, or from stdin when the path is "-"
pub async fn read_lines(path: &str) -> Result<Vec<String>> {
    if path == STDIN_PATH {
        let stdin = io::stdin();
        let lines = stdin
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("failed to read addresses from stdin")?;
        return Ok(lines);
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read address file '{}'", path))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Check a single address and print the result
pub async fn process_single(url: &str, probe_args: &ProbeArgs, output_args: &OutputArgs) -> Result<()> {
    if url.trim().is_empty() {
        bail!("address must not be blank");
    }
    let Some(normalized) = normalize(url) else {
        bail!("'{}' is not a valid address", url.trim());
    };

    let options = ProbeOptions::from_args(probe_args);
    let outcome = probe(&normalized, &options).await;

    let mut sink = OutputSink::open(output_args).await?;
    sink.write_header().await?;
    sink.write_record(&ProbeRecord {
        label: normalized.as_str(),
        url: normalized.as_str(),
        outcome: &outcome,
    })
    .await?;
    sink.finish().await
}

/// Check every address in a file and print results in input order
pub async fn process_batch(
    path: &str,
    full_urls: bool,
    concurrency: usize,
    probe_args: &ProbeArgs,
    output_args: &OutputArgs,
) -> Result<()> {
    if path.trim().is_empty() {
        bail!("address file path must not be blank");
    }
    if concurrency == 0 {
        bail!(BatchError::ZeroConcurrency);
    }

    let lines = read_lines(path).await?;
    let options = ProbeOptions::from_args(probe_args);
    let entries = run_batch(&lines, &options, DisplayMode::from_full_urls(full_urls), concurrency)
        .await
        .with_context(|| format!("nothing to check in '{}'", path))?;

    let mut sink = OutputSink::open(output_args).await?;
    sink.write_header().await?;
    for entry in &entries {
        sink.write_record(&ProbeRecord {
            label: &entry.label,
            url: entry.url.as_str(),
            outcome: &entry.outcome,
        })
        .await?;
    }
    sink.finish().await?;

    let supported = entries.iter().filter(|e| e.outcome.is_supported()).count();
    info!(total = entries.len(), supported, "batch finished");
    Ok(())
}

/// Destination for formatted results: an output file or stdout
struct OutputSink {
    writer: Option<BufWriter<File>>,
    format: OutputFormat,
    colored: bool,
}

impl OutputSink {
    async fn open(args: &OutputArgs) -> Result<Self> {
        let writer = if let Some(output_path) = &args.output {
            let file = File::create(output_path)
                .await
                .with_context(|| format!("failed to create output file '{}'", output_path))?;
            Some(BufWriter::new(file))
        } else {
            None
        };
        Ok(Self {
            writer,
            format: args.format,
            colored: args.output.is_none() && !args.no_color,
        })
    }

    async fn write_header(&mut self) -> Result<()> {
        if self.format == OutputFormat::Csv {
            self.write(CSV_HEADER).await?;
        }
        Ok(())
    }

    async fn write_record(&mut self, record: &ProbeRecord<'_>) -> Result<()> {
        let line = format_output(record, self.format, self.colored);
        self.write(&line).await
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        if let Some(writer) = &mut self.writer {
            writer.write_all(text.as_bytes()).await?;
        } else {
            print!("{}", text);
        }
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        if let Some(writer) = &mut self.writer {
            writer.flush().await?;
        }
        Ok(())
    }
}
