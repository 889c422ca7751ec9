//! Build script generating Rust stubs from the broker protocol definitions.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tell Cargo to re-run if the wire definitions change
    println!("cargo:rerun-if-changed=proto");

    // Server stubs are generated as well; the integration tests run an
    // in-process mock broker against them.
    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile(
            &[
                "proto/databroker/v1/broker.proto",
                "proto/databroker/v2/broker.proto",
            ],
            &["proto"],
        )?;

    Ok(())
}
