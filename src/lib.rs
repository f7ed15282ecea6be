//! # LC-3 Virtual Machine.
//!
//! `lc3-vm` emulates the LC-3 system: 65,536 words of memory, eight general
//! purpose registers, a condition register and the six console trap
//! routines. Program images are raw big-endian files whose first word is the
//! load address.
//!
//! Usage starts with [`emulator::from_image_files`] for a terminal-backed
//! machine, or with [`Emulator::new`] to supply custom input and output:
//!
//! # Example
//! ```
//! use lc3_vm::emulator::Emulator;
//! use lc3_vm::hardware::keyboard::ChannelInput;
//! use lc3_vm::image::Image;
//! use std::sync::mpsc;
//!
//! let (_keys, receiver) = mpsc::channel();
//! let mut emu = Emulator::new(ChannelInput::new(receiver), Vec::<u8>::new());
//! // a single TRAP HALT at the default program counter start
//! let image = Image { origin: 0x3000, words: vec![0xF025] };
//! emu.load_image(&image).unwrap();
//! emu.execute().unwrap();
//! ```
//! # Errors
//! - images that are unreadable, malformed or too long for memory
//! - programs reaching the reserved or privileged opcodes, an unknown trap
//!   routine, or failing console I/O

pub mod emulator;
pub mod errors;
pub mod hardware;
pub mod image;
pub mod numbers;
pub mod terminal;

pub use emulator::Emulator;
