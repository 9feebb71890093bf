use address_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut types = Vec::new();

    // Record variants
    types.push(clean_type(EntityRef::export_to_string()?));
    types.push(clean_type(AddressRoleFlags::export_to_string()?));
    types.push(clean_type(ServerAddress::export_to_string()?));
    types.push(clean_type(ExtractedAddress::export_to_string()?));
    types.push(clean_type(SuggestedAddress::export_to_string()?));

    // Canonical form
    types.push(clean_type(CanonicalAddress::export_to_string()?));

    // Company types
    types.push(clean_type(EmbeddedCompany::export_to_string()?));
    types.push(clean_type(CompanySnapshot::export_to_string()?));
    types.push(clean_type(AddressPkRef::export_to_string()?));
    types.push(clean_type(CompanyContext::export_to_string()?));
    types.push(clean_type(CompanyChoice::export_to_string()?));

    // Deletion
    types.push(clean_type(EligibilityReason::export_to_string()?));

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../picker/src/api-types"));
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("address-types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Strips the per-file header and imports; every type lands in the same file.
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
