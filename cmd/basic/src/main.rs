//! Basic errchain example
//!
//! Tears down a handful of simulated resources, keeps every failure,
//! and shows how the combined error renders, matches and extracts.
//!
//! # Environment Variables
//!
//! - `ERRCHAIN_LOG=debug` - Log filter directive (default: `info`)

use std::error::Error;
use std::fmt;
use std::io;

use errchain::{BoxError, Chain, ResultExt};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

// ERRCHAIN_LOG=debug cargo run -p errchain-basic

/// Returned by a resource that was already released.
#[derive(Debug, PartialEq)]
struct AlreadyClosed(&'static str);

impl fmt::Display for AlreadyClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} already closed", self.0)
    }
}

impl Error for AlreadyClosed {}

/// Failure while flushing buffered data, with the underlying cause.
#[derive(Debug)]
struct FlushError {
    resource: &'static str,
    cause: io::Error,
}

impl fmt::Display for FlushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flushing {}", self.resource)
    }
}

impl Error for FlushError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

struct Resource {
    name: &'static str,
    outcome: fn(&'static str) -> Result<(), BoxError>,
}

fn ok(_: &'static str) -> Result<(), BoxError> {
    Ok(())
}

fn closed(name: &'static str) -> Result<(), BoxError> {
    Err(Box::new(AlreadyClosed(name)))
}

fn short_write(name: &'static str) -> Result<(), BoxError> {
    Err(Box::new(FlushError {
        resource: name,
        cause: io::Error::new(io::ErrorKind::UnexpectedEof, "peer hung up"),
    }))
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("ERRCHAIN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Release every resource, remembering each failure instead of stopping
/// at the first one.
fn teardown(resources: &[Resource]) -> Result<(), BoxError> {
    let results = resources.iter().map(|r| {
        let result = (r.outcome)(r.name);
        match &result {
            Ok(()) => debug!(resource = r.name, "released"),
            Err(e) => warn!(resource = r.name, error = %e, "release failed"),
        }
        result
    });
    errchain::collect(results)
}

fn report(err: &BoxError) {
    info!("combined error: {}", err);

    if let Some(chain) = err.downcast_ref::<Chain>() {
        info!(slots = chain.len(), "error is a chain");
        for (i, slot) in chain.iter().enumerate() {
            match slot {
                Some(e) => debug!(slot = i, "{}", e),
                None => debug!(slot = i, "<absent>"),
            }
        }
    }

    info!(
        cache_closed = errchain::is(&**err, &AlreadyClosed("cache")),
        socket_closed = errchain::is(&**err, &AlreadyClosed("socket")),
        eof = errchain::is_io_kind(&**err, io::ErrorKind::UnexpectedEof),
        "matches"
    );

    match errchain::find::<FlushError>(&**err) {
        Some(flush) => info!(
            resource = flush.resource,
            cause = %flush.cause,
            "found flush failure"
        ),
        None => info!("no flush failure"),
    }
}

fn main() -> Result<(), BoxError> {
    init_tracing();

    let resources = [
        Resource {
            name: "journal",
            outcome: short_write,
        },
        Resource {
            name: "socket",
            outcome: ok,
        },
        Resource {
            name: "cache",
            outcome: closed,
        },
        Resource {
            name: "lock",
            outcome: ok,
        },
    ];

    match teardown(&resources) {
        Ok(()) => info!("teardown clean"),
        Err(err) => report(&err),
    }

    // A single failure comes back as itself, not wrapped.
    if let Err(err) = teardown(&resources[2..]) {
        info!(
            wrapped = err.downcast_ref::<Chain>().is_some(),
            "single failure: {}", err
        );
    }

    // Primary result plus cleanup outcome.
    let primary: Result<u32, BoxError> = Err("commit rejected".into());
    let cleanup = closed("session");
    if let Err(err) = primary.chain_err(cleanup) {
        info!("commit with cleanup: {}", err);
    }

    Ok(())
}
