//! Client for the TinyURL-style shortening endpoint.
//!
//! [`TinyUrlClient`] builds `<base>/api-create.php?url=<long>`, issues a
//! single GET through a [`Transport`], and turns the response into a
//! `Result<Url, TinyUrlError>`. Results are delivered to a completion either
//! directly on the transport task or through a configured [`Dispatcher`].
//!
//! # Example
//!
//! ```rust,no_run
//! use snip_client::{ClientConfig, ReqwestTransport, TinyUrlClient};
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::builder()
//!     .base_url(Url::parse("http://tinyurl.com")?)
//!     .build();
//! let client = TinyUrlClient::new(config, ReqwestTransport::new()?)?;
//!
//! match client.shorten_result("https://example.com/some/long/path").await {
//!     Ok(short) => println!("{short}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod dispatch;
pub mod error;
pub mod transport;

pub use client::{ClientConfig, ShortenTask, TinyUrlClient, CREATE_PATH};
pub use dispatch::{Dispatcher, Job, ThreadDispatcher};
pub use error::{ClientError, TransportError};
pub use snip_core::TinyUrlError;
pub use transport::{ReqwestTransport, Transport, TransportResponse};
