use anyhow::{bail, Result};
use futures::TryStreamExt;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::matcher::Target;
use crate::store::{ObjectStore, StoreError};
use crate::utils::{is_confirmed, object_uri};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NotFound,
    Cancelled,
    Deleted(usize),
}

/// Search, report, ask, delete. Output goes to `out`, the answer is read
/// from `input`. The first backend error ends the run; anything already
/// deleted stays deleted.
pub async fn run<S, R, W>(
    store: &S,
    config: &StorageConfig,
    input: &mut R,
    out: &mut W,
) -> Result<Outcome>
where
    S: ObjectStore + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let target = config.target();
    writeln!(
        out,
        "Searching {}/{} for {}...",
        config.bucket,
        target.prefix(),
        target.filename()
    )?;
    out.flush()?;

    let matches = find_matches(store, &target).await?;
    if !report(&matches, config, out)? {
        return Ok(Outcome::NotFound);
    }

    if !confirm(matches.len(), input, out).await? {
        writeln!(out, "Cancelled.")?;
        info!(matches = matches.len(), "deletion cancelled");
        return Ok(Outcome::Cancelled);
    }

    delete_matches(store, &matches, out).await?;
    writeln!(out, "Done.")?;
    Ok(Outcome::Deleted(matches.len()))
}

/// Keys under the target prefix that name the target file, in listing order.
pub async fn find_matches<S>(store: &S, target: &Target) -> Result<Vec<String>, StoreError>
where
    S: ObjectStore + ?Sized,
{
    let mut keys = store.list(target.prefix());
    let mut matches = Vec::new();
    let mut scanned = 0usize;

    while let Some(key) = keys.try_next().await? {
        scanned += 1;
        if target.matches(&key) {
            debug!(key = %key, "matched");
            matches.push(key);
        }
    }

    info!(scanned, matched = matches.len(), "listing finished");
    Ok(matches)
}

/// Prints the matches, or `Not found.` when there are none. Returns whether
/// anything was found.
pub fn report<W: Write>(matches: &[String], config: &StorageConfig, out: &mut W) -> Result<bool> {
    if matches.is_empty() {
        writeln!(out, "Not found.")?;
        return Ok(false);
    }
    for key in matches {
        writeln!(out, "Found: {}", object_uri(&config.scheme, &config.bucket, key))?;
    }
    Ok(true)
}

/// Blocks until one line is read. Closed input is an error rather than a
/// decline, so a non-interactive run exits non-zero without deleting.
pub async fn confirm<R, W>(count: usize, input: &mut R, out: &mut W) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "\nDelete {count} file(s)? [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer).await? == 0 {
        writeln!(out)?;
        bail!("input closed before an answer was given");
    }
    Ok(is_confirmed(&answer))
}

/// One request per key, strictly in order.
pub async fn delete_matches<S, W>(store: &S, matches: &[String], out: &mut W) -> Result<()>
where
    S: ObjectStore + ?Sized,
    W: Write,
{
    for key in matches {
        store.delete(key).await?;
        writeln!(out, "Deleted: {key}")?;
        debug!(key = %key, "deleted");
    }
    Ok(())
}
