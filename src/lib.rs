//! Dialogue Sim - Goal-Oriented Dialogue Simulator
//!
//! This crate simulates task-oriented dialogues between a learning agent and a
//! rule-based user pursuing a hidden goal against a knowledge base, producing
//! encoded states and rewards for agent training.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
