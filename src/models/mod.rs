//! Request, response and domain models for the city directory API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, plus the
//! city domain model shared with the repository.

pub mod city;
pub mod requests;
pub mod responses;

pub use city::City;
pub use requests::{InvalidateRequest, SearchParams, UpdateCityRequest};
pub use responses::{
    CityListResponse, ClearResponse, ErrorResponse, HealthResponse, InvalidateResponse,
    SearchResponse, StatsResponse, UpdateCityResponse,
};
