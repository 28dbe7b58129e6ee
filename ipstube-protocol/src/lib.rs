//! ipstube External Command Protocol
//!
//! This crate defines the line-oriented commands a host computer or a
//! message broker sends to the clock. It only parses; acting on a command
//! is the job of `ipstube-core`.
//!
//! # Protocol Overview
//!
//! Serial commands are ASCII lines terminated by `\n` (an optional `\r`
//! before it is stripped):
//! ```text
//! SENSORS: CPU=42, MEM=63, GPU=17   three labelled two-digit readouts
//! CLOCK                             return to the clock face
//! TXT: hello                        text on every panel
//! BMP: Qk02AAAAAAAAADYAAAAo...      base64 encoded bitmap
//! 30579642100 some lyric line       12-band spectrum plus optional text
//! ```
//!
//! Broker commands arrive as a single integer "state" value, see [`broker`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod broker;
pub mod command;
pub mod line;

pub use broker::{status_state, BrokerCommand, ButtonPress};
pub use command::{CommandError, SensorReading, SerialCommand, SPECTRUM_BANDS_LEN};
pub use line::{LineError, LineParser, MAX_LINE_LEN};
