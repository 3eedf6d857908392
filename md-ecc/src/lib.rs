#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Layers
//!
//! - [`Engine`] drives the accelerator one transaction at a time: modular
//!   multiplication, addition, subtraction, inversion and H calculation.
//! - Point operations: [`Engine::scalar_mul`], [`Engine::point_add`],
//!   [`Engine::validate_public_key`].
//! - ECDSA: [`Engine::sign`], [`Engine::verify`] and the lower level
//!   [`Engine::r_s`] / [`Engine::r_s_check`].
//!
//! The accelerator is reached through the [`Accelerator`] trait.
//! [`SoftAccelerator`] models the engine in software. Operands are
//! `crypto-bigint` [`U256`] values, split into 32-bit register words by
//! [`regs::to_words`] and [`regs::from_words`].

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod accel;
pub mod curves;
pub mod ecdsa;
pub mod regs;

mod config;
mod curve;
mod engine;
mod error;
mod key;
mod monty;
mod point;
mod uint;

#[cfg(test)]
mod dev;

pub use crate::{
    accel::{Accelerator, SoftAccelerator},
    config::Config,
    curve::CurveParams,
    ecdsa::Signature,
    engine::Engine,
    error::{Error, Result},
    key::PrivateKey,
    monty::n0_calculate,
    point::{AffinePoint, PublicKey, UNCOMPRESSED_LEN},
    uint::{BYTES, U256, WORDS},
};
pub use bigint;
pub use rand_core;
