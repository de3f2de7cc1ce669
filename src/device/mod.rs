//! The device module contains the command-side interface to the readout
//! board: stateless encoders producing network-byte-order command words.

pub mod command;

pub use command::{
    read_datafifo, read_memory, read_register, read_status, send_pulse, write_memory,
    write_memory_file, write_register,
};
