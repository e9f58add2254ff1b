use bufmeta::{
    layout::{self, SLOT_TABLE},
    BufferGeometry, BufferHandle, MetadataKind, MetadataValue, Result,
};
use clap::{App, Arg, SubCommand};

fn main() -> Result<()> {
    env_logger::init();

    let matches = App::new("bufmeta-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Buffer metadata side-channel demo tool")
        .subcommand(
            SubCommand::with_name("demo")
                .about("Run a scripted set/get/clear/copy walkthrough")
                .arg(
                    Arg::with_name("refresh_rate")
                        .short("r")
                        .long("refresh-rate")
                        .value_name("HZ")
                        .help("Refresh rate to store")
                        .default_value("59.94")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("layout")
                .about("Print the record's slot table (the wire ABI)"),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Show version and build information"),
        )
        .get_matches();

    match matches.subcommand() {
        ("demo", Some(demo_matches)) => run_demo(demo_matches),
        ("layout", Some(_)) => show_layout(),
        ("info", Some(_)) => show_info(),
        _ => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn run_demo(matches: &clap::ArgMatches) -> Result<()> {
    let refresh_rate: f32 = matches
        .value_of("refresh_rate")
        .unwrap()
        .parse()
        .map_err(|_| {
            bufmeta::MetadataError::invalid_parameter("refresh_rate", "invalid rate format")
        })?;

    println!("Allocating a memfd-backed metadata region...");
    let handle = BufferHandle::allocate("bufmeta-demo")?;

    println!("Storing attributes:");
    bufmeta::set(&handle, &MetadataValue::RefreshRate(refresh_rate))?;
    println!("  refresh-rate = {}", refresh_rate);

    let geometry = BufferGeometry {
        width: 1920,
        height: 1080,
        format: 1,
    };
    bufmeta::set(&handle, &MetadataValue::BufferGeometry(geometry))?;
    println!("  buffer-geometry = {}x{} format {}", geometry.width, geometry.height, geometry.format);

    println!("\nReading back through a duplicated handle:");
    let duplicate = handle.try_clone()?;
    for kind in [MetadataKind::RefreshRate, MetadataKind::BufferGeometry] {
        match bufmeta::get(&duplicate, kind) {
            Ok(value) => println!("  {} = {:?}", kind.name(), value),
            Err(err) => println!("  {} -> {}", kind.name(), err),
        }
    }

    println!("\nCopying the whole record to a second region:");
    let other = BufferHandle::allocate("bufmeta-demo-copy")?;
    bufmeta::set(&other, &MetadataValue::Interlaced(1))?;
    bufmeta::copy(&handle, &other)?;
    for kind in [
        MetadataKind::RefreshRate,
        MetadataKind::BufferGeometry,
        MetadataKind::Interlaced,
    ] {
        match bufmeta::get(&other, kind) {
            Ok(value) => println!("  {} = {:?}", kind.name(), value),
            Err(err) => println!("  {} -> {}", kind.name(), err),
        }
    }

    println!("\nClearing refresh-rate:");
    bufmeta::clear(&handle, MetadataKind::RefreshRate)?;
    match bufmeta::get(&handle, MetadataKind::RefreshRate) {
        Ok(value) => println!("  refresh-rate = {:?}", value),
        Err(err) => println!("  refresh-rate -> {}", err),
    }

    Ok(())
}

fn show_layout() -> Result<()> {
    println!("Record size: {} bytes", layout::RECORD_SIZE);
    println!("Mapped size: {} bytes (page size {})", layout::mapped_size(), layout::page_size());
    println!("Presence mask: offset {}, {} bytes", layout::PRESENCE_MASK_OFFSET, layout::PRESENCE_MASK_SIZE);
    println!("\n{:<20} {:>4} {:>7} {:>5}  sentinel", "kind", "bit", "offset", "size");
    for entry in SLOT_TABLE.iter() {
        println!(
            "{:<20} {:>4} {:>7} {:>5}  {}",
            entry.kind.name(),
            entry.kind.raw(),
            entry.offset,
            entry.size,
            if entry.sentinel.is_some() { "yes" } else { "-" }
        );
    }
    Ok(())
}

fn show_info() -> Result<()> {
    println!("bufmeta - shared-memory buffer metadata side-channel");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    println!("\nCapabilities:");
    println!("  - {} attribute kinds, append-only ABI", MetadataKind::ALL.len());
    println!("  - Call-scoped MAP_SHARED record access");
    println!("  - Presence-tracked typed attributes");
    println!("  - Whole-record copy between handles");

    #[cfg(feature = "c-api")]
    println!("  - C API enabled");

    Ok(())
}
