//! End-to-end runs of the `oas3-tsgen` binary.

use std::{fs, process::Command};

const BIN: &str = env!("CARGO_BIN_EXE_oas3-tsgen");
const PETSTORE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/petstore.json");

#[test]
fn test_generate_writes_client_and_example() {
  let temp_dir = tempfile::tempdir().unwrap();

  let status = Command::new(BIN)
    .args(["--color", "never", "generate", "-q", "--example", "-i", PETSTORE, "-o"])
    .arg(temp_dir.path())
    .status()
    .unwrap();
  assert!(status.success(), "code generation failed");

  let client = fs::read_to_string(temp_dir.path().join("swagger-petstore-client.ts")).unwrap();
  assert!(client.starts_with("/**\n * AUTO-GENERATED CODE - DO NOT EDIT!\n"));
  assert!(client.contains("export class SwaggerPetstoreClient {"));
  assert!(client.contains("async list_pets(params: { limit?: number } = {}): Promise<ApiResult<Pet[]>>"));

  let example = fs::read_to_string(temp_dir.path().join("swagger-petstore-client.example.ts")).unwrap();
  assert!(example.contains("import { SwaggerPetstoreClient } from \"./swagger-petstore-client\";"));
}

#[test]
fn test_generate_honors_file_and_class_names() {
  let temp_dir = tempfile::tempdir().unwrap();

  let status = Command::new(BIN)
    .args([
      "--color",
      "never",
      "generate",
      "-q",
      "-i",
      PETSTORE,
      "--class-name",
      "PetsApi",
      "--file-name",
      "api.ts",
      "--only",
      "showPetById",
      "-o",
    ])
    .arg(temp_dir.path())
    .status()
    .unwrap();
  assert!(status.success(), "code generation failed");

  let client = fs::read_to_string(temp_dir.path().join("api.ts")).unwrap();
  assert!(client.contains("export class PetsApi {"));
  assert!(client.contains("async show_pet_by_id(petId: string)"));
  assert!(!client.contains("async list_pets("));
  assert!(!temp_dir.path().join("api.example.ts").exists());
}

#[test]
fn test_generate_fails_without_paths() {
  let temp_dir = tempfile::tempdir().unwrap();
  let spec_path = temp_dir.path().join("spec.json");
  fs::write(&spec_path, r#"{"openapi":"3.0.0","info":{"title":"Broken","version":"1"}}"#).unwrap();

  let output = Command::new(BIN)
    .args(["--color", "never", "generate", "-q", "-i"])
    .arg(&spec_path)
    .arg("-o")
    .arg(temp_dir.path())
    .output()
    .unwrap();

  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("no `paths` object"), "{stderr}");
}

#[test]
fn test_list_operations() {
  let output = Command::new(BIN)
    .args(["--color", "never", "list", "operations", "-i", PETSTORE])
    .output()
    .unwrap();

  assert!(output.status.success());
  let stdout = String::from_utf8_lossy(&output.stdout);
  for expected in ["listPets", "create_pets", "/pets/{petId}"] {
    assert!(stdout.contains(expected), "missing {expected} in:\n{stdout}");
  }
}
