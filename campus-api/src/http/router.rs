//! Resource routing
//!
//! Every resource gets the same five routes under `/api/v1/{path}`, wired to
//! its own usecase and repository from the provider.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use super::handler::{self, GenericHandler};
use crate::db::RepositoryProvider;
use crate::models::{
    Batch, Book, Department, Entity, Note, Question, Session, Staff, Student, Syllabus, Teacher,
    Transport, University, User, Verification,
};
use crate::usecase::GenericUsecase;

/// Prefix every resource lives under
pub const API_PREFIX: &str = "/api/v1";

/// All resource routes, nested under [`API_PREFIX`].
pub fn api_router<P: RepositoryProvider>(provider: &P) -> Router {
    let resources = Router::new()
        .merge(resource::<University, _>(provider, "universities"))
        .merge(resource::<Department, _>(provider, "departments"))
        .merge(resource::<Session, _>(provider, "sessions"))
        .merge(resource::<Batch, _>(provider, "batches"))
        .merge(resource::<User, _>(provider, "users"))
        .merge(resource::<Student, _>(provider, "students"))
        .merge(resource::<Teacher, _>(provider, "teachers"))
        .merge(resource::<Staff, _>(provider, "staffs"))
        .merge(resource::<Verification, _>(provider, "verifications"))
        .merge(resource::<Book, _>(provider, "books"))
        .merge(resource::<Question, _>(provider, "questions"))
        .merge(resource::<Note, _>(provider, "notes"))
        .merge(resource::<Syllabus, _>(provider, "syllabuses"))
        .merge(resource::<Transport, _>(provider, "transports"));

    Router::new().nest(API_PREFIX, resources)
}

/// The five CRUD routes for one record shape at `/{path}`.
pub fn resource<T, P>(provider: &P, path: &str) -> Router
where
    T: Entity,
    P: RepositoryProvider,
{
    let usecase = GenericUsecase::new(provider.repository::<T>());
    let state = Arc::new(GenericHandler::<T>::new(Arc::new(usecase)));

    tracing::debug!(resource = T::RESOURCE, path, "registering routes");

    Router::new()
        .route(
            &format!("/{path}"),
            post(handler::create::<T>).get(handler::get_all::<T>),
        )
        .route(
            &format!("/{path}/{{id}}"),
            get(handler::get_by_id::<T>)
                .put(handler::update::<T>)
                .delete(handler::delete::<T>),
        )
        .with_state(state)
}
