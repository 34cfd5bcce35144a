//! Metro route planner server.
//!
//! A web application that answers: "What is the shortest (or quickest) way
//! from this stop to that one, and what will it cost?"

pub mod config;
pub mod domain;
pub mod export;
pub mod favorites;
pub mod network;
pub mod planner;
pub mod web;
