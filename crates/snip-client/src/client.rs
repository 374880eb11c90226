use std::sync::Arc;

use snip_core::TinyUrlError;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, trace};
use typed_builder::TypedBuilder;
use url::Url;

use crate::dispatch::Dispatcher;
use crate::error::ClientError;
use crate::transport::{Transport, TransportResponse};

/// Path appended to the base URL for every shortening request.
pub const CREATE_PATH: &str = "api-create.php";

const URL_QUERY_KEY: &str = "url";

/// Body the service returns when it rejects the long URL.
const REJECTED_MARKER: &str = "Error";

type Result<T> = std::result::Result<T, TinyUrlError>;

/// Configures a [`TinyUrlClient`].
#[derive(Clone, TypedBuilder)]
pub struct ClientConfig {
    /// The service root, e.g. `http://tinyurl.com`.
    pub base_url: Url,
    /// Where completions run. `None` runs them on the transport task.
    #[builder(default, setter(strip_option))]
    pub response_queue: Option<Arc<dyn Dispatcher>>,
}

/// Handle to an in-flight [`TinyUrlClient::shorten`] call.
///
/// Dropping the handle detaches the request; it still completes.
#[derive(Debug)]
pub struct ShortenTask {
    handle: JoinHandle<()>,
}

impl ShortenTask {
    /// Aborts the request. The completion may or may not have run already,
    /// and will not run afterwards if it had not been reached.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Returns `true` once the request finished or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the request task to end.
    ///
    /// Without a response queue the completion has run when this returns.
    /// With one, it has at least been handed to the queue.
    pub async fn wait(self) -> std::result::Result<(), JoinError> {
        self.handle.await
    }
}

/// Client for the shortening endpoint.
///
/// Every call issues exactly one request; there are no retries and no
/// timeouts beyond those of the transport.
pub struct TinyUrlClient<T> {
    base_url: Url,
    endpoint: Url,
    transport: Arc<T>,
    response_queue: Option<Arc<dyn Dispatcher>>,
}

impl<T: Transport> TinyUrlClient<T> {
    /// Creates a client.
    ///
    /// Fails if the base URL cannot have a path appended (e.g. `mailto:`).
    pub fn new(config: ClientConfig, transport: T) -> std::result::Result<Self, ClientError> {
        let endpoint = create_endpoint(&config.base_url)?;
        Ok(Self {
            base_url: config.base_url,
            endpoint,
            transport: Arc::new(transport),
            response_queue: config.response_queue,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn response_queue(&self) -> Option<&Arc<dyn Dispatcher>> {
        self.response_queue.as_ref()
    }

    /// Builds the request URL for `long`.
    ///
    /// `long` travels form-urlencoded in the `url` query parameter exactly as
    /// given. Pass the text the user entered rather than a parsed [`Url`],
    /// which would gain a root `/` for inputs such as `http://test.com`.
    pub fn create_url(&self, long: &str) -> Url {
        let mut request = self.endpoint.clone();
        request.query_pairs_mut().append_pair(URL_QUERY_KEY, long);
        request
    }

    /// Requests a short URL for `long` and interprets the response.
    ///
    /// The result is returned to the caller as is; no response queue is
    /// involved.
    pub async fn fetch(&self, long: &str) -> Result<Url> {
        let request = self.create_url(long);
        debug!(long, "Requesting short url");
        interpret(self.transport.get(request).await)
    }

    /// Starts a request for `long` and hands its result to `completion`.
    ///
    /// The call returns immediately. `completion` runs exactly once when the
    /// request finishes: on the response queue if one is configured,
    /// otherwise on the task that ran the request. After
    /// [`ShortenTask::cancel`] it may never run.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn shorten<F>(&self, long: &str, completion: F) -> ShortenTask
    where
        F: FnOnce(Result<Url>) + Send + 'static,
    {
        let request = self.create_url(long);
        let transport = Arc::clone(&self.transport);
        let response_queue = self.response_queue.clone();
        debug!(long, "Starting shorten request");

        let handle = tokio::spawn(async move {
            let result = interpret(transport.get(request).await);
            match response_queue {
                Some(queue) => {
                    trace!("Dispatching completion to response queue");
                    queue.dispatch(Box::new(move || completion(result)));
                }
                None => completion(result),
            }
        });

        ShortenTask { handle }
    }

    /// Runs [`shorten`](Self::shorten) and waits for its completion.
    ///
    /// If the completion is never delivered the result is
    /// [`TinyUrlError::NoData`].
    pub async fn shorten_result(&self, long: &str) -> Result<Url> {
        let (tx, rx) = oneshot::channel();
        self.shorten(long, move |result| {
            // the receiver only goes away if the caller stopped waiting
            let _ = tx.send(result);
        });
        rx.await.unwrap_or(Err(TinyUrlError::NoData))
    }
}

fn create_endpoint(base_url: &Url) -> std::result::Result<Url, ClientError> {
    let mut endpoint = base_url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    endpoint
        .path_segments_mut()
        .map_err(|()| ClientError::InvalidBaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .push(CREATE_PATH);
    Ok(endpoint)
}

fn interpret(response: TransportResponse) -> Result<Url> {
    if let Some(error) = &response.error {
        debug!(error = %error, "Shorten request failed in transport");
        return Err(TinyUrlError::NoData);
    }
    if response.status != Some(200) {
        debug!(status = ?response.status, "Shorten request returned non-200 status");
        return Err(TinyUrlError::NoData);
    }

    let body = response.body.ok_or(TinyUrlError::NoData)?;
    let text = String::from_utf8(body).map_err(|_| TinyUrlError::NoData)?;

    if text == REJECTED_MARKER {
        return Err(TinyUrlError::InvalidUrlEntered);
    }

    Url::parse(&text).map_err(|e| {
        debug!(body = %text, error = %e, "Response body is not a url");
        TinyUrlError::ParsingError
    })
}
