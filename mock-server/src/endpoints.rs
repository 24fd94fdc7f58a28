//! Catalog of GitHub REST endpoints commonly mocked in tests.
//!
//! Names follow `<METHOD>_<PATH SEGMENTS>` with parameters spelled
//! `BY_<NAME>`, so `GET /repos/{owner}/{repo}` is `GET_REPOS_BY_OWNER_BY_REPO`.

use axum::http::Method;

use crate::endpoint::EndpointPattern;

// users

pub const GET_USER: EndpointPattern = EndpointPattern::from_static(Method::GET, "/user");
pub const PATCH_USER: EndpointPattern = EndpointPattern::from_static(Method::PATCH, "/user");
pub const GET_USER_REPOS: EndpointPattern = EndpointPattern::from_static(Method::GET, "/user/repos");
pub const GET_USERS_BY_USERNAME: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/users/{username}");
pub const GET_USERS_ORGS_BY_USERNAME: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/users/{username}/orgs");
pub const GET_USERS_REPOS_BY_USERNAME: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/users/{username}/repos");

// orgs

pub const GET_ORGS_BY_ORG: EndpointPattern = EndpointPattern::from_static(Method::GET, "/orgs/{org}");
pub const GET_ORGS_REPOS_BY_ORG: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/orgs/{org}/repos");
pub const POST_ORGS_REPOS_BY_ORG: EndpointPattern =
    EndpointPattern::from_static(Method::POST, "/orgs/{org}/repos");
pub const GET_ORGS_MEMBERS_BY_ORG: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/orgs/{org}/members");
pub const GET_ORGS_PROJECTS_BY_ORG: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/orgs/{org}/projects");

// repos

pub const GET_REPOS_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}");
pub const PATCH_REPOS_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::PATCH, "/repos/{owner}/{repo}");
pub const DELETE_REPOS_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::DELETE, "/repos/{owner}/{repo}");
pub const GET_REPOS_COMMITS_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}/commits");
pub const GET_REPOS_COMMITS_BY_OWNER_BY_REPO_BY_REF: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}/commits/{ref}");
pub const GET_REPOS_CONTENTS_BY_OWNER_BY_REPO_BY_PATH: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}/contents/{path}");
pub const GET_REPOS_RELEASES_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}/releases");
pub const POST_REPOS_RELEASES_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::POST, "/repos/{owner}/{repo}/releases");
pub const GET_REPOS_RELEASES_LATEST_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}/releases/latest");
pub const GET_REPOS_ACTIONS_ARTIFACTS_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}/actions/artifacts");

// issues and pulls

pub const GET_REPOS_ISSUES_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}/issues");
pub const POST_REPOS_ISSUES_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::POST, "/repos/{owner}/{repo}/issues");
pub const GET_REPOS_ISSUES_BY_OWNER_BY_REPO_BY_ISSUE_NUMBER: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}/issues/{issue_number}");
pub const PATCH_REPOS_ISSUES_BY_OWNER_BY_REPO_BY_ISSUE_NUMBER: EndpointPattern =
    EndpointPattern::from_static(Method::PATCH, "/repos/{owner}/{repo}/issues/{issue_number}");
pub const GET_REPOS_PULLS_BY_OWNER_BY_REPO: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}/pulls");
pub const GET_REPOS_PULLS_BY_OWNER_BY_REPO_BY_PULL_NUMBER: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/repos/{owner}/{repo}/pulls/{pull_number}");

// search

pub const GET_SEARCH_CODE: EndpointPattern = EndpointPattern::from_static(Method::GET, "/search/code");
pub const GET_SEARCH_REPOSITORIES: EndpointPattern =
    EndpointPattern::from_static(Method::GET, "/search/repositories");
