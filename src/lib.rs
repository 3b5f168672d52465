//! readme-stats: GitHub profile statistics badges
//!
//! Collects account age, commit, star, repository, follower, pull request, issue and
//! lines-of-code statistics through the GitHub GraphQL and REST APIs and writes them
//! into SVG templates. Lines of code are tallied per repository and cached, so only
//! repositories with new commits are walked again.

pub mod age;
pub mod cli;
pub mod config;
pub mod domain;
pub mod github;
pub mod loc;
pub mod render;
pub mod utils;
