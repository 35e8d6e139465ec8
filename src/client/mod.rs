//! HTTP client for the catalogue API
//!
//! Each call maps to one route under `/api`. Non-2xx responses surface as
//! [`ClientError::Api`] carrying the server's `error` message, so callers
//! can show it as-is.

mod session;

pub use session::Session;

use std::fmt;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::domain::{
    BookId, BookInput, BookPatch, LoginInput, RegisterInput, ReviewId, ReviewInput, ReviewPatch,
};
use crate::models::{Book, Review, User};
use crate::services::{AuthResponse, BookDetail, BookPage};

const USER_AGENT: &str = concat!("shelfnotes-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub enum ClientError {
    /// Connection, TLS or body decoding failure
    Transport(reqwest::Error),
    /// Server answered with a non-success status
    Api { status: u16, message: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "Request failed: {}", e),
            ClientError::Api { status, message } => write!(f, "{} ({})", message, status),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            ClientError::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e)
    }
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// `base_url` points at the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Same connection pool, different credentials
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Builder for `path` with the session's bearer token attached.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.bearer() {
            Some(bearer) => builder.header(reqwest::header::AUTHORIZATION, bearer),
            None => builder,
        }
    }

    pub async fn register(&self, input: &RegisterInput) -> Result<AuthResponse, ClientError> {
        self.send(self.request(Method::POST, "users/register").json(input))
            .await
    }

    pub async fn login(&self, input: &LoginInput) -> Result<AuthResponse, ClientError> {
        self.send(self.request(Method::POST, "users/login").json(input))
            .await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.send(self.request(Method::GET, "users/me")).await
    }

    pub async fn list_books(&self, page: u64) -> Result<BookPage, ClientError> {
        self.send(self.request(Method::GET, "books").query(&[("page", page)]))
            .await
    }

    pub async fn get_book(&self, id: BookId) -> Result<BookDetail, ClientError> {
        self.send(self.request(Method::GET, &format!("books/{}", id)))
            .await
    }

    pub async fn create_book(&self, input: &BookInput) -> Result<Book, ClientError> {
        self.send(self.request(Method::POST, "books").json(input))
            .await
    }

    pub async fn update_book(&self, id: BookId, patch: &BookPatch) -> Result<Book, ClientError> {
        self.send(self.request(Method::PUT, &format!("books/{}", id)).json(patch))
            .await
    }

    pub async fn delete_book(&self, id: BookId) -> Result<String, ClientError> {
        let body: MessageBody = self
            .send(self.request(Method::DELETE, &format!("books/{}", id)))
            .await?;
        Ok(body.message)
    }

    pub async fn add_review(
        &self,
        book_id: BookId,
        input: &ReviewInput,
    ) -> Result<Review, ClientError> {
        self.send(
            self.request(Method::POST, &format!("reviews/{}", book_id))
                .json(input),
        )
        .await
    }

    pub async fn update_review(
        &self,
        id: ReviewId,
        patch: &ReviewPatch,
    ) -> Result<Review, ClientError> {
        self.send(self.request(Method::PUT, &format!("reviews/{}", id)).json(patch))
            .await
    }

    pub async fn delete_review(&self, id: ReviewId) -> Result<String, ClientError> {
        let body: MessageBody = self
            .send(self.request(Method::DELETE, &format!("reviews/{}", id)))
            .await?;
        Ok(body.message)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(api_error(response).await)
        }
    }
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) if !text.is_empty() => text,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    tracing::debug!("API call failed with {}: {}", status, message);
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
