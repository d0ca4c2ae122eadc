//! CLI command implementations.

use std::fs;

use strait_common::{Program, StringTable};
use strait_validator::table::TABLE_SIZE;
use strait_validator::{native, PROGRAM, STRINGS};
use strait_vm::{EventSink, Halt};

/// Prints each event as `TYPE 0xID: message`, the way an operator
/// console would show it.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, event_type: u32, event_id: u32, message: &str) {
        let type_name = match event_type {
            1 => "DEBUG",
            2 => "INFO",
            3 => "ERROR",
            4 => "CRITICAL",
            _ => "EVENT",
        };
        println!("{type_name} 0x{event_id:04X}: {message}");
    }
}

/// Validate a raw table image file.
pub fn validate(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: validate requires an image file");
        eprintln!("Usage: strait validate <image> [--native]");
        return Err(1);
    }

    let input = &args[0];
    let use_native = match args.get(1).map(String::as_str) {
        None => false,
        Some("--native") => true,
        Some(other) => {
            eprintln!("error: unknown flag '{other}'");
            return Err(1);
        }
    };

    let image = fs::read(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })?;

    if image.len() != TABLE_SIZE {
        eprintln!(
            "error: '{input}' is {} bytes; a table image is exactly {TABLE_SIZE}",
            image.len()
        );
        return Err(1);
    }

    let mut sink = ConsoleSink;

    if use_native {
        if native::validate(&image, &mut sink) {
            Ok(())
        } else {
            Err(2)
        }
    } else {
        // Drive the VM directly so a runtime error in the hosted
        // program is distinguishable from an invalid table here, even
        // though the flight framework would see the same status for
        // both.
        let program = Program::new(&PROGRAM).map_err(|e| {
            eprintln!("error: {e}");
            3
        })?;
        let strings = StringTable::new(&STRINGS).map_err(|e| {
            eprintln!("error: {e}");
            3
        })?;

        match strait_vm::run(program, &image, strings, &mut sink) {
            Ok(Halt::True) => Ok(()),
            Ok(Halt::False) => Err(2),
            Err(e) => {
                eprintln!("runtime error: {e}");
                Err(3)
            }
        }
    }
}

/// Print the reference program listing and its string table.
pub fn program(args: &[String]) -> Result<(), i32> {
    if !args.is_empty() {
        eprintln!("error: program takes no arguments");
        eprintln!("Usage: strait program");
        return Err(1);
    }

    println!("; {} instructions", PROGRAM.len());
    for (index, instr) in PROGRAM.iter().enumerate() {
        println!("{index:>4}  {instr}");
    }

    println!();
    println!("; {} strings", STRINGS.len());
    for (index, entry) in STRINGS.iter().enumerate() {
        println!("{index:>4}  {entry:?}");
    }

    Ok(())
}
