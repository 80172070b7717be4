//! Vehicle maintenance tracker
//!
//! Backend HTTP que registra los odómetros de los vehículos de cada
//! usuario y calcula qué mantenimientos están pendientes.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
