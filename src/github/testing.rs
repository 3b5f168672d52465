//! Scripted transport and response builders for unit tests

use super::transport::{HttpResponse, Transport};
use super::{ApiError, ApiResult, GithubClient};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Replays canned responses in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<HttpResponse>>,
    requests: RefCell<Vec<Value>>,
    urls: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<HttpResponse>) -> Self {
        Self { replies: RefCell::new(replies.into()), ..Default::default() }
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.borrow().len()
    }

    fn next_reply(&self, url: &str) -> ApiResult<HttpResponse> {
        self.urls.borrow_mut().push(url.to_string());
        self.replies.borrow_mut().pop_front().ok_or_else(|| ApiError::Network {
            url: url.to_string(),
            message: "no scripted reply left".to_string(),
        })
    }
}

impl Transport for ScriptedTransport {
    fn post_json(&self, url: &str, body: &Value) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(body.clone());
        self.next_reply(url)
    }

    fn get(&self, url: &str) -> ApiResult<HttpResponse> {
        self.next_reply(url)
    }
}

pub fn client(transport: ScriptedTransport) -> GithubClient<ScriptedTransport> {
    GithubClient::with_transport(transport, "octo", "https://api.test/graphql", "https://api.test")
}

pub fn ok(body: Value) -> HttpResponse {
    HttpResponse { status: 200, body: body.to_string(), link: None }
}

pub fn status(code: u16, body: &str) -> HttpResponse {
    HttpResponse { status: code, body: body.to_string(), link: None }
}

/// One history page; each commit is `(author id, additions, deletions)`.
pub fn history_body(commits: &[(Option<&str>, u64, u64)], next_cursor: Option<&str>) -> Value {
    let edges: Vec<Value> = commits
        .iter()
        .map(|(author, additions, deletions)| {
            let user = author.map(|id| json!({ "id": id }));
            json!({"node": {
                "committedDate": "2024-01-01T00:00:00Z",
                "author": {"user": user},
                "additions": additions,
                "deletions": deletions,
            }})
        })
        .collect();
    json!({"data": {"repository": {"defaultBranchRef": {"target": {"history": {
        "totalCount": commits.len(),
        "edges": edges,
        "pageInfo": {"endCursor": next_cursor, "hasNextPage": next_cursor.is_some()},
    }}}}}})
}

pub fn empty_repository_body() -> Value {
    json!({"data": {"repository": {"defaultBranchRef": null}}})
}

/// One page of the LOC repository listing; each repo is `(owner/name, commit count)`.
pub fn repositories_body(repos: &[(&str, Option<u64>)], next_cursor: Option<&str>) -> Value {
    let edges: Vec<Value> = repos
        .iter()
        .map(|(name, commits)| {
            let branch = commits.map(|count| json!({"target": {"history": {"totalCount": count}}}));
            json!({"node": {"nameWithOwner": name, "defaultBranchRef": branch}})
        })
        .collect();
    json!({"data": {"user": {"repositories": {
        "totalCount": repos.len(),
        "edges": edges,
        "pageInfo": {"endCursor": next_cursor, "hasNextPage": next_cursor.is_some()},
    }}}})
}

pub fn account_body(id: &str, created_at: &str) -> Value {
    json!({"data": {"user": {"id": id, "createdAt": created_at}}})
}

pub fn followers_body(count: u64) -> Value {
    json!({"data": {"user": {"followers": {"totalCount": count}}}})
}

/// One page of the star/repository count query; each entry is a stargazer count.
pub fn stars_body(total_count: u64, stars: &[u64], next_cursor: Option<&str>) -> Value {
    let edges: Vec<Value> = stars
        .iter()
        .enumerate()
        .map(|(i, count)| {
            json!({"node": {"nameWithOwner": format!("octo/r{i}"), "stargazers": {"totalCount": count}}})
        })
        .collect();
    json!({"data": {"user": {"repositories": {
        "totalCount": total_count,
        "edges": edges,
        "pageInfo": {"endCursor": next_cursor, "hasNextPage": next_cursor.is_some()},
    }}}})
}

/// A REST search page holding `items` results, optionally linking to `next`.
pub fn search_page(items: usize, next: Option<&str>) -> HttpResponse {
    let body: Vec<Value> = (0..items).map(|i| json!({ "number": i })).collect();
    HttpResponse {
        status: 200,
        body: json!({ "total_count": items, "items": body }).to_string(),
        link: next.map(|url| format!("<{url}>; rel=\"next\"")),
    }
}
