//! Runs module

mod api;
mod models;

pub use models::{
    Run, RunActions, RunAttributes, RunCreateOptions, RunPagination, RunPaginationMeta, RunQuery,
    RunRelationships, RunStatus, RunsResponse,
};
