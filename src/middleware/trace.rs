//! Per-request tracing.

use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::handler::Endpoint;
use crate::middleware::Middleware;
use crate::request::Request;

/// Opens a `request` span carrying the method and path, and records one
/// event with the status and latency once the inner endpoint answers.
///
/// Put it first in the outermost pipeline so the latency covers everything
/// else.
pub fn trace() -> Middleware {
    Middleware::from_fn(|req: Request, next: Endpoint| {
        let span = info_span!("request", method = %req.method(), path = %req.path());

        async move {
            let started = Instant::now();
            let res = next.call(req).await;
            info!(
                status = res.status_code().as_u16(),
                latency_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
                "request completed"
            );
            res
        }
        .instrument(span)
    })
}
