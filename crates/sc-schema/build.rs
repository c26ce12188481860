fn main() {
    println!("cargo:rerun-if-changed=proto/payload.proto");
    println!("cargo:rerun-if-changed=proto/value.proto");
    println!("cargo:rerun-if-changed=proto/entities.proto");
    println!("cargo:rerun-if-changed=proto/envelope.proto");

    prost_build::Config::new()
        // Entity and container messages project into the read store's
        // JSONB `doc` column (spec §4.6); deriving Serialize/Deserialize
        // here is cheaper than hand-mapping every field in
        // sc-ledger-sync, which also reads `doc` back out for
        // PropertyPage enrichment.
        .type_attribute(".", "#[derive(serde::Serialize, serde::Deserialize)]")
        .compile_protos(
            &[
                "proto/payload.proto",
                "proto/value.proto",
                "proto/entities.proto",
                "proto/envelope.proto",
            ],
            &["proto/"],
        )
        .expect("failed to compile supply-chain wire schema");
}
