//! # Registrar Demo Entry Point
//!
//! The setup lives in lib.rs so it can be tested.

fn main() -> std::process::ExitCode {
    registrar_demo::run()
}
