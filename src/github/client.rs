//! Typed GitHub operations on top of a [`Transport`]

use super::queries::{
    AccountNode, CommitHistory, Envelope, FollowersNode, RepositoriesNode, RepositoryConnection,
    RepositoryData, UserData, ACCOUNT_QUERY, FOLLOWERS_QUERY, HISTORY_PAGE_SIZE, HISTORY_QUERY,
    LOC_REPOS_PAGE_SIZE, LOC_REPOS_QUERY, REPO_STATS_QUERY, STARS_PAGE_SIZE,
};
use super::rest::{next_link, page_items};
use super::transport::{HttpResponse, Transport, UreqTransport};
use super::{ApiError, ApiResult, QueryCounter, QueryKind};
use crate::domain::{Affiliation, RepoSnapshot};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// The tracked account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// GraphQL node id, compared against commit authors.
    pub id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepoStats {
    pub total_count: u64,
    pub stars: u64,
}

pub struct GithubClient<T: Transport = UreqTransport> {
    transport: T,
    login: String,
    graphql_url: String,
    rest_url: String,
    counter: QueryCounter,
}

impl GithubClient<UreqTransport> {
    pub fn new(token: &str, login: &str, graphql_url: &str, rest_url: &str) -> Self {
        Self::with_transport(UreqTransport::new(token), login, graphql_url, rest_url)
    }
}

impl<T: Transport> GithubClient<T> {
    pub fn with_transport(transport: T, login: &str, graphql_url: &str, rest_url: &str) -> Self {
        Self {
            transport,
            login: login.to_string(),
            graphql_url: graphql_url.to_string(),
            rest_url: rest_url.trim_end_matches('/').to_string(),
            counter: QueryCounter::new(),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn counter(&self) -> &QueryCounter {
        &self.counter
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one GraphQL document and hand back the raw response, whatever its status.
    pub fn post_graphql(
        &self,
        kind: QueryKind,
        query: &str,
        variables: Value,
    ) -> ApiResult<HttpResponse> {
        self.counter.record(kind);
        let body = json!({ "query": query, "variables": variables });
        self.transport.post_json(&self.graphql_url, &body)
    }

    /// Send a GraphQL document and decode its `data`; any non-200 status is fatal.
    pub fn query<D: DeserializeOwned>(
        &self,
        kind: QueryKind,
        query: &str,
        variables: Value,
    ) -> ApiResult<D> {
        let response = self.post_graphql(kind, query, variables)?;
        if !response.is_success() {
            return Err(self.transport_error(response));
        }
        decode_data(&response.body)
    }

    pub fn transport_error(&self, response: HttpResponse) -> ApiError {
        ApiError::Transport {
            status: response.status,
            body: response.body,
            counts: self.counter.to_string(),
        }
    }

    pub fn account(&self) -> ApiResult<Account> {
        let data: UserData<AccountNode> =
            self.query(QueryKind::Account, ACCOUNT_QUERY, json!({ "login": self.login }))?;
        let user = data.user.ok_or_else(|| self.user_missing())?;
        Ok(Account { id: user.id, created_at: user.created_at })
    }

    pub fn followers(&self) -> ApiResult<u64> {
        let data: UserData<FollowersNode> =
            self.query(QueryKind::Followers, FOLLOWERS_QUERY, json!({ "login": self.login }))?;
        Ok(data.user.ok_or_else(|| self.user_missing())?.followers.total_count)
    }

    /// Repository count and stars summed over every page of the affiliation query.
    pub fn repository_stats(&self, affiliations: &[Affiliation]) -> ApiResult<RepoStats> {
        let mut stats = RepoStats::default();
        let mut cursor: Option<String> = None;
        loop {
            let page = self.repositories_page(
                QueryKind::RepoStats,
                REPO_STATS_QUERY,
                affiliations,
                STARS_PAGE_SIZE,
                cursor.as_deref(),
            )?;
            stats.total_count = page.total_count;
            stats.stars += page
                .edges
                .iter()
                .filter_map(|edge| edge.node.as_ref())
                .filter_map(|node| node.stargazers)
                .map(|stargazers| stargazers.total_count)
                .sum::<u64>();
            match next_cursor(&page) {
                Some(next) => cursor = Some(next),
                None => return Ok(stats),
            }
        }
    }

    /// Number of repositories for the affiliations, read from the first page.
    pub fn repository_count(&self, affiliations: &[Affiliation]) -> ApiResult<u64> {
        let page =
            self.repositories_page(QueryKind::RepoStats, REPO_STATS_QUERY, affiliations, 1, None)?;
        Ok(page.total_count)
    }

    /// Every repository for the affiliations along with its default-branch commit count.
    pub fn repositories(&self, affiliations: &[Affiliation]) -> ApiResult<Vec<RepoSnapshot>> {
        let mut repos = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self.repositories_page(
                QueryKind::LocRepos,
                LOC_REPOS_QUERY,
                affiliations,
                LOC_REPOS_PAGE_SIZE,
                cursor.as_deref(),
            )?;
            repos.extend(
                page.edges
                    .iter()
                    .filter_map(|edge| edge.node.as_ref())
                    .map(|node| RepoSnapshot::new(&node.name_with_owner, node.total_commits())),
            );
            tracing::debug!(fetched = repos.len(), "Fetched repository page");
            match next_cursor(&page) {
                Some(next) => cursor = Some(next),
                None => return Ok(repos),
            }
        }
    }

    /// One page of a repository's default-branch history.
    ///
    /// `Ok(None)` means the repository has no default branch (or is not visible), so there
    /// is nothing to walk. A 403 is reported as [`ApiError::RateLimited`].
    pub fn history_page(
        &self,
        owner: &str,
        name: &str,
        cursor: Option<&str>,
    ) -> ApiResult<Option<CommitHistory>> {
        let variables = json!({
            "owner": owner,
            "repo_name": name,
            "cursor": cursor,
            "first": HISTORY_PAGE_SIZE,
        });
        let response = self.post_graphql(QueryKind::LocHistory, HISTORY_QUERY, variables)?;
        match response.status {
            200 => {}
            403 => return Err(ApiError::RateLimited { counts: self.counter.to_string() }),
            _ => return Err(self.transport_error(response)),
        }

        let data: RepositoryData = decode_data(&response.body)?;
        let history = data
            .repository
            .and_then(|repo| repo.default_branch_ref)
            .and_then(|branch| branch.target)
            .and_then(|target| target.history);
        Ok(history)
    }

    /// Follow `Link: rel="next"` from `url` and collect every item.
    pub fn rest_paginate(&self, url: &str) -> ApiResult<Vec<Value>> {
        let mut items = Vec::new();
        let mut current = Some(url.to_string());
        while let Some(url) = current.take() {
            self.counter.record(QueryKind::Search);
            let response = self.transport.get(&url)?;
            if !response.is_success() {
                return Err(self.transport_error(response));
            }
            items.extend(page_items(&response.body)?);
            current = response.link.as_deref().and_then(next_link);
        }
        Ok(items)
    }

    /// Pull requests and issues authored by the tracked account, across every repository.
    pub fn pr_issue_counts(&self) -> ApiResult<(u64, u64)> {
        let prs = self.rest_paginate(&self.search_url("pr"))?.len() as u64;
        let issues = self.rest_paginate(&self.search_url("issue"))?.len() as u64;
        Ok((prs, issues))
    }

    fn search_url(&self, kind: &str) -> String {
        format!("{}/search/issues?q=type:{kind}+author:{}&per_page=100", self.rest_url, self.login)
    }

    fn repositories_page(
        &self,
        kind: QueryKind,
        query: &str,
        affiliations: &[Affiliation],
        first: u32,
        cursor: Option<&str>,
    ) -> ApiResult<RepositoryConnection> {
        let owner_affiliation: Vec<&str> = affiliations.iter().map(|a| a.as_str()).collect();
        let variables = json!({
            "owner_affiliation": owner_affiliation,
            "login": self.login,
            "cursor": cursor,
            "first": first,
        });
        let data: UserData<RepositoriesNode> = self.query(kind, query, variables)?;
        Ok(data.user.ok_or_else(|| self.user_missing())?.repositories)
    }

    fn user_missing(&self) -> ApiError {
        ApiError::Decode(format!("user '{}' not found", self.login))
    }
}

fn next_cursor(page: &RepositoryConnection) -> Option<String> {
    if page.edges.is_empty() || !page.page_info.has_next_page {
        return None;
    }
    page.page_info.end_cursor.clone()
}

/// Decode the `data` member of a GraphQL response body.
pub fn decode_data<D: DeserializeOwned>(body: &str) -> ApiResult<D> {
    let envelope: Envelope<D> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    match envelope.data {
        Some(data) => Ok(data),
        None => {
            let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
            Err(ApiError::Decode(if messages.is_empty() {
                "response has no data".to_string()
            } else {
                messages.join("; ")
            }))
        }
    }
}
