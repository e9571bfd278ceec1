//! Stickies Desktop Application
//!
//! A small authenticated sticky-notes client backed by a managed identity
//! service and a managed GraphQL data API.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod config;
mod services;
mod state;
mod views;

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stickies=debug".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Stickies...");

    dioxus::launch(app::App);
}
