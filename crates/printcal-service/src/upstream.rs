//! A local salvo server standing in for a remote calendar host in tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use salvo::conn::{Acceptor, TcpListener};
use salvo::http::StatusCode;
use salvo::{
    Depot, FlowCtrl, Handler, Listener, Request, Response, Router, Server, async_trait,
};

/// Answers every request with the next canned response and records what was asked.
struct Canned {
    responses: Mutex<VecDeque<(u16, &'static str)>>,
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Handler for Canned {
    async fn handle(
        &self,
        req: &mut Request,
        _depot: &mut Depot,
        res: &mut Response,
        _ctrl: &mut FlowCtrl,
    ) {
        let target = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.uri().path().to_string(), ToString::to_string);
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{} {target}", req.method()));

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some((status, body)) => {
                res.status_code(StatusCode::from_u16(status).unwrap_or(StatusCode::OK));
                res.render(body);
            }
            None => {
                res.status_code(StatusCode::GONE);
            }
        }
    }
}

/// A running fake upstream bound to a free loopback port.
pub struct FakeUpstream {
    base: String,
    seen: Arc<Mutex<Vec<String>>>,
}

impl FakeUpstream {
    /// ## Summary
    /// Starts a server that answers requests on any path with `responses` in
    /// order, then with `410 Gone` once they run out.
    ///
    /// ## Errors
    /// Returns an error if the loopback port cannot be bound.
    pub async fn start(responses: Vec<(u16, &'static str)>) -> salvo::Result<Self> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let canned = Canned {
            responses: Mutex::new(responses.into()),
            seen: Arc::clone(&seen),
        };
        let router = Router::new().push(Router::with_path("{**rest}").goal(canned));

        let acceptor = TcpListener::new("127.0.0.1:0").try_bind().await?;
        let addr = acceptor
            .holdings()
            .first()
            .and_then(|holding| holding.local_addr.clone().into_std())
            .ok_or_else(|| std::io::Error::other("fake upstream has no socket address"))?;
        tokio::spawn(Server::new(acceptor).serve(router));

        tracing::debug!(%addr, "Fake upstream listening");
        Ok(Self {
            base: format!("http://{addr}"),
            seen,
        })
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Requests received so far, as `METHOD /path?query`.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// ## Summary
/// Returns a loopback URL for `path` on a port nothing listens on.
///
/// ## Errors
/// Returns an error if no ephemeral port can be reserved.
pub fn unreachable_url(path: &str) -> std::io::Result<String> {
    // Bind and drop to find a free port.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?;
    Ok(format!("http://{addr}{path}"))
}
