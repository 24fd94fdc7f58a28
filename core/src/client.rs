//! Stateless HTTP request builder and response parser for the GitHub API.
//!
//! # Design
//! `GithubClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller runs the round-trip through whatever `Transport` it likes,
//! keeping the core deterministic and free of I/O dependencies.
//!
//! List endpoints tolerate an empty body and treat it as an empty list, the
//! way GitHub answers some list calls with no content.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ErrorBody};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::pagination::parse_link_header;
use crate::types::{CreateRelease, Organization, Page, Release, Repository, User};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const ACCEPT: (&str, &str) = ("accept", "application/vnd.github+json");

/// Synchronous, stateless client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    base_url: String,
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl GithubClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{path}", self.base_url),
            headers: vec![(ACCEPT.0.to_string(), ACCEPT.1.to_string())],
            body: None,
        }
    }

    pub fn build_get_user(&self, username: &str) -> HttpRequest {
        self.get(&format!("/users/{username}"))
    }

    pub fn build_list_user_orgs(&self, username: &str) -> HttpRequest {
        self.get(&format!("/users/{username}/orgs"))
    }

    pub fn build_list_org_repos(&self, org: &str, page: Option<u32>) -> HttpRequest {
        match page {
            Some(page) => self.get(&format!("/orgs/{org}/repos?page={page}")),
            None => self.get(&format!("/orgs/{org}/repos")),
        }
    }

    pub fn build_list_releases(&self, owner: &str, repo: &str) -> HttpRequest {
        self.get(&format!("/repos/{owner}/{repo}/releases"))
    }

    pub fn build_create_release(
        &self,
        owner: &str,
        repo: &str,
        input: &CreateRelease,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/repos/{owner}/{repo}/releases", self.base_url),
            headers: vec![
                (ACCEPT.0.to_string(), ACCEPT.1.to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response)?;
        parse_object(&response)
    }

    pub fn parse_list_user_orgs(&self, response: HttpResponse) -> Result<Vec<Organization>, ApiError> {
        check_status(&response)?;
        parse_list(&response)
    }

    pub fn parse_list_org_repos(&self, response: HttpResponse) -> Result<Page<Repository>, ApiError> {
        check_status(&response)?;
        parse_page(&response)
    }

    pub fn parse_list_releases(&self, response: HttpResponse) -> Result<Vec<Release>, ApiError> {
        check_status(&response)?;
        parse_list(&response)
    }

    pub fn parse_create_release(&self, response: HttpResponse) -> Result<Release, ApiError> {
        check_status(&response)?;
        parse_object(&response)
    }

    /// Follow `next` links from the first page until the server stops
    /// advertising one, collecting every repository on the way.
    pub fn list_all_org_repos<T: Transport>(
        &self,
        transport: &T,
        org: &str,
    ) -> Result<Vec<Repository>, ApiError> {
        let mut repos = Vec::new();
        let mut page = None;
        loop {
            let response = transport.send(self.build_list_org_repos(org, page))?;
            let current = self.parse_list_org_repos(response)?;
            repos.extend(current.items);
            match current.next_page {
                Some(next) => page = Some(next),
                None => return Ok(repos),
            }
        }
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    let message = ErrorBody::message_from(&response.body);
    if response.status == 404 {
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::Response {
        status: response.status,
        message,
    })
}

fn parse_object<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn parse_list<T: DeserializeOwned>(response: &HttpResponse) -> Result<Vec<T>, ApiError> {
    if response.body.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_object(response)
}

fn parse_page<T: DeserializeOwned>(response: &HttpResponse) -> Result<Page<T>, ApiError> {
    let links = response.header("link").map(parse_link_header).unwrap_or_default();
    Ok(Page {
        items: parse_list(response)?,
        next_page: links.next,
        last_page: links.last,
    })
}
