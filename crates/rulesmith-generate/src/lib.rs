//! # Rulesmith Generate
//!
//! Natural-language to WAF rule generation backed by a hosted language model.
//!
//! ## Overview
//!
//! The generator takes a free-text request ("block all traffic from Russia
//! to /login"), prompts a model with strict output instructions, and decodes
//! the reply into a [`GeneratedRule`]: a firewall expression, a structured
//! rule object, an explanation, and safety warnings. Requests the model finds
//! too ambiguous come back with `needs_clarification` set instead of a
//! guessed expression.
//!
//! The model itself is behind the [`ModelClient`] trait. Production uses
//! [`HttpModelClient`] against a Workers AI style run endpoint; tests swap in
//! scripted clients.
//!
//! ## Key Types
//!
//! - [`RuleGenerator`] - Guards input, prompts, decodes
//! - [`GeneratedRule`] - The decoded rule shape
//! - [`ModelClient`] - The transport seam
//! - [`HttpModelClient`] - HTTP client for hosted models
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rulesmith_generate::{HttpModelClient, ModelConfig, RuleGenerator};
//!
//! async fn example() {
//!     let client = HttpModelClient::new(ModelConfig {
//!         base_url: "https://api.cloudflare.com/client/v4/accounts/ACCOUNT/ai/run".into(),
//!         api_token: "token".into(),
//!         ..ModelConfig::default()
//!     })
//!     .unwrap();
//!
//!     let generator = RuleGenerator::new(client);
//!     let rule = generator
//!         .generate("block all traffic from Russia to /login")
//!         .await
//!         .unwrap();
//!     println!("{}", rule.expression);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **No history dependency**: this crate produces rules; storing them is
//!   the caller's concern
//! - **Lenient decoding**: replies may be fenced or prose-wrapped; the parser
//!   recovers the first balanced rule object before failing
//! - **Clarification is not an error**: an ambiguous request yields an `Ok`
//!   rule with `needs_clarification` set

pub mod client;
pub mod error;
pub mod generator;
pub mod parse;
pub mod prompt;
pub mod rule;

pub use client::{HttpModelClient, ModelClient, ModelConfig};
pub use error::{GenerateError, Result};
pub use generator::{RuleGenerator, MIN_INPUT_LEN};
pub use rule::GeneratedRule;
