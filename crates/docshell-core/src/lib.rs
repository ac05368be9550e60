#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, and event coalescing.
//!
//! # Role in docshell
//! `docshell-core` is the input layer. It owns the host-agnostic event
//! vocabulary (viewport resize, pointer, keyboard) and the coalescer that
//! keeps high-frequency input from thrashing layout state.
//!
//! # How it fits in the system
//! The layout crate (`docshell-layout`) computes state and placements from
//! these primitives; the runtime (`docshell-runtime`) receives `Event`s from
//! the host and feeds them through an [`event_coalescer::EventCoalescer`]
//! before touching the shared layout state.

pub mod event;
pub mod event_coalescer;
pub mod geometry;
