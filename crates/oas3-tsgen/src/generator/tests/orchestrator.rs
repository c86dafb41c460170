use std::{collections::HashSet, thread};

use serde_json::json;

use super::{json_response, petstore, spec};
use crate::generator::{
  errors::{GenerateError, GenerationWarning},
  model::Spec,
  orchestrator::{GenerateOptions, Orchestrator},
};

fn generate(spec: Spec) -> String {
  Orchestrator::new(spec, GenerateOptions::default())
    .generate("test.json")
    .expect("generation should succeed")
    .source
}

#[test]
fn test_generates_petstore_client() {
  let output = Orchestrator::new(petstore(), GenerateOptions::default())
    .generate("fixtures/petstore.json")
    .expect("generation should succeed");

  assert_eq!(output.class_name, "SwaggerPetstoreClient");
  assert_eq!(output.base_url, "http://petstore.swagger.io/v1");
  assert_eq!(output.file_name, "swagger-petstore-client.ts");
  assert!(output.example.is_none());
  assert_eq!(output.endpoints.len(), 3);

  assert_eq!(output.stats.endpoints_extracted, 3);
  assert_eq!(output.stats.types_generated, 1);
  assert_eq!(output.stats.cycles_detected, 0);
  assert!(output.stats.warnings.is_empty());

  let source = &output.source;
  for expected in [
    " * Swagger Petstore\n * Version: 1.0.0\n * Source: fixtures/petstore.json\n",
    "export type ApiResult<T, E extends number = number> =",
    "export interface Pet {\n  name: string;\n  tag?: string;\n}\n",
    "const DEFAULT_BASE_URL = \"http://petstore.swagger.io/v1\";\n",
    "export class SwaggerPetstoreClient {\n",
    "  async list_pets(params: { limit?: number } = {}): Promise<ApiResult<Pet[]>> {\n",
    "  async create_pets(body: Pet): Promise<ApiResult<unknown>> {\n",
    "  async show_pet_by_id(petId: string): Promise<ApiResult<Pet, 404>> {\n",
    "   * @param petId The id of the pet to retrieve\n",
  ] {
    assert!(source.contains(expected), "missing {expected:?} in:\n{source}");
  }
  assert!(!source.contains("interface Error"));
  assert!(!source.contains("Pets ="));
}

#[test]
fn test_referenced_schema_becomes_declared_type() {
  let spec = spec(
    json!({
      "/pets": {
        "get": {
          "operationId": "listPets",
          "responses": {
            "200": json_response(json!({ "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }))
          }
        }
      }
    }),
    json!({
      "Pet": {
        "type": "object",
        "required": ["name"],
        "properties": { "name": { "type": "string" }, "tag": { "type": "string" } }
      }
    }),
  );

  let source = generate(spec);
  assert!(source.contains("export interface Pet {\n  name: string;\n  tag?: string;\n}\n"));
  assert!(source.contains("async list_pets(): Promise<ApiResult<Pet[]>> {"));
  assert!(source.contains("return this.#request<Pet[]>(\"GET\", `/pets`);"));
}

#[test]
fn test_output_ignores_key_order() {
  let forward = Spec::from_value(json!({
    "openapi": "3.0.3",
    "info": { "title": "Shop", "version": "2.0.0", "description": "Orders" },
    "servers": [{ "url": "https://shop.example.com" }],
    "paths": {
      "/orders/{orderId}": {
        "get": {
          "operationId": "getOrder",
          "summary": "One order",
          "parameters": [{ "name": "orderId", "in": "path", "required": true, "schema": { "type": "integer" } }],
          "responses": { "200": json_response(json!({ "$ref": "#/components/schemas/Order" })) }
        }
      }
    },
    "components": {
      "schemas": {
        "Customer": { "type": "object", "properties": { "email": { "type": "string" } } },
        "Order": {
          "type": "object",
          "required": ["id"],
          "properties": {
            "id": { "type": "integer" },
            "customer": { "$ref": "#/components/schemas/Customer" }
          }
        }
      }
    }
  }))
  .expect("forward spec should parse");

  let shuffled = Spec::from_value(json!({
    "components": {
      "schemas": {
        "Order": {
          "properties": {
            "id": { "type": "integer" },
            "customer": { "$ref": "#/components/schemas/Customer" }
          },
          "required": ["id"],
          "type": "object"
        },
        "Customer": { "properties": { "email": { "type": "string" } }, "type": "object" }
      }
    },
    "paths": {
      "/orders/{orderId}": {
        "get": {
          "responses": { "200": json_response(json!({ "$ref": "#/components/schemas/Order" })) },
          "parameters": [{ "schema": { "type": "integer" }, "required": true, "in": "path", "name": "orderId" }],
          "summary": "One order",
          "operationId": "getOrder"
        }
      }
    },
    "servers": [{ "url": "https://shop.example.com" }],
    "info": { "description": "Orders", "version": "2.0.0", "title": "Shop" },
    "openapi": "3.0.3"
  }))
  .expect("shuffled spec should parse");

  assert_eq!(generate(forward), generate(shuffled));
}

#[test]
fn test_missing_paths_is_an_error() {
  let result = Orchestrator::new(Spec::default(), GenerateOptions::default()).generate("empty.json");
  assert!(matches!(result, Err(GenerateError::MissingPaths)));

  let parsed = Spec::from_value(json!({ "openapi": "3.0.3", "info": { "title": "No paths", "version": "1" } }));
  assert!(matches!(parsed, Err(GenerateError::MissingPaths)));
}

#[test]
fn test_method_name_collision_names_both_operations() {
  let spec = spec(
    json!({
      "/pets": { "get": { "operationId": "getPets", "responses": {} } },
      "/pets/all": { "get": { "operationId": "get_pets", "responses": {} } }
    }),
    json!({}),
  );

  match Orchestrator::new(spec, GenerateOptions::default()).generate("pets.json") {
    Err(GenerateError::MethodNameCollision {
      method_name,
      first,
      second,
    }) => {
      assert_eq!(method_name, "get_pets");
      assert_eq!(first, "GET /pets (getPets)");
      assert_eq!(second, "GET /pets/all (get_pets)");
    }
    other => panic!("expected a method name collision, got {other:?}"),
  }
}

#[test]
fn test_operations_named_like_client_members() {
  let source = generate(spec(
    json!({
      "/request": { "get": { "operationId": "request", "responses": { "200": json_response(json!({ "type": "string" })) } } },
      "/retries": { "get": { "operationId": "retries", "responses": {} } }
    }),
    json!({}),
  ));

  assert_eq!(source.matches("async request(").count(), 1);
  assert!(source.contains("async request(): Promise<ApiResult<string>> {"));
  assert!(source.contains("async #request<T, E extends number = number>("));
  assert!(source.contains("return this.#request<string>(\"GET\", `/request`);"));
  assert!(source.contains("async retries(): Promise<ApiResult<unknown>> {"));
  assert!(source.contains("readonly #retries: number;"));
  assert!(!source.contains("private "));
}

#[test]
fn test_constructor_operation_is_an_error() {
  let spec = spec(
    json!({ "/make": { "post": { "operationId": "constructor", "responses": {} } } }),
    json!({}),
  );

  match Orchestrator::new(spec, GenerateOptions::default()).generate("make.json") {
    Err(GenerateError::ReservedMethodName { method_name, operation }) => {
      assert_eq!(method_name, "constructor");
      assert_eq!(operation, "POST /make (constructor)");
    }
    other => panic!("expected a reserved method name error, got {other:?}"),
  }
}

#[test]
fn test_unknown_schemas_degrade_without_failing() {
  let spec = spec(
    json!({
      "/anything": {
        "post": {
          "operationId": "postAnything",
          "requestBody": { "content": { "application/json": { "schema": {} } } },
          "responses": {
            "200": json_response(json!({ "$ref": "#/components/schemas/Missing" })),
            "500": { "description": "boom" }
          }
        }
      }
    }),
    json!({}),
  );

  let output = Orchestrator::new(spec, GenerateOptions::default())
    .generate("anything.json")
    .expect("generation should succeed");
  assert!(
    output
      .source
      .contains("async post_anything(body?: unknown): Promise<ApiResult<unknown, 500>> {")
  );
  assert_eq!(
    output.stats.warnings,
    [GenerationWarning::UnresolvedSchema {
      reference: "#/components/schemas/Missing".to_string(),
    }]
  );
}

#[test]
fn test_malformed_schema_nodes_degrade_locally() {
  let spec = spec(
    json!({
      "/pets": { "get": { "operationId": "listPets", "responses": { "200": json_response(json!({ "$ref": "#/components/schemas/Pet" })) } } }
    }),
    json!({
      "Pet": {
        "type": "object",
        "properties": {
          "name": { "type": "string", "required": true },
          "tags": { "type": "array", "items": "string" }
        }
      }
    }),
  );

  let output = Orchestrator::new(spec, GenerateOptions::default())
    .generate("pets.json")
    .expect("generation should succeed");

  assert!(
    output.source.contains("export interface Pet {\n  name?: string;\n  tags?: unknown[];\n}\n"),
    "{}",
    output.source
  );
  assert!(output.source.contains("async list_pets(): Promise<ApiResult<Pet>> {"));
  assert_eq!(
    output.stats.warnings,
    [GenerationWarning::MalformedSchema {
      schema: "\"string\"".to_string()
    }]
  );
}

#[test]
fn test_schema_named_like_the_client_is_renamed() {
  let source = generate(spec(
    json!({
      "/clients": { "get": { "operationId": "listClients", "responses": { "200": json_response(json!({ "$ref": "#/components/schemas/TestApiClient" })) } } }
    }),
    json!({ "TestApiClient": { "type": "object", "properties": { "id": { "type": "string" } } } }),
  ));

  assert!(source.contains("export class TestApiClient {\n"), "{source}");
  assert!(source.contains("export interface TestApiClient2 {\n"), "{source}");
  assert!(source.contains("async list_clients(): Promise<ApiResult<TestApiClient2>> {"));
  assert!(!source.contains("export interface TestApiClient {"));
}

#[test]
fn test_recursive_schema_is_counted_and_declared_once() {
  let spec = spec(
    json!({
      "/nodes": {
        "get": {
          "operationId": "getNode",
          "responses": { "200": json_response(json!({ "$ref": "#/components/schemas/Node" })) }
        }
      }
    }),
    json!({
      "Node": {
        "type": "object",
        "properties": { "value": { "type": "integer" }, "next": { "$ref": "#/components/schemas/Node" } }
      }
    }),
  );

  let output = Orchestrator::new(spec, GenerateOptions::default())
    .generate("nodes.json")
    .expect("generation should succeed");
  assert_eq!(output.stats.cycles_detected, 1);
  assert_eq!(output.stats.cycle_details, [vec!["Node".to_string()]]);
  assert_eq!(output.source.matches("export interface Node {").count(), 1);
  assert!(output.source.contains("  next?: Node;\n"));
}

#[test]
fn test_options_control_names_filters_and_example() {
  let options = GenerateOptions::builder()
    .include_example(true)
    .api_key("secret")
    .class_name("pets api")
    .output_file_name("pets")
    .excluded_operations(HashSet::from(["createPets".to_string()]))
    .build();

  let output = Orchestrator::new(petstore(), options)
    .generate("petstore.json")
    .expect("generation should succeed");

  assert_eq!(output.class_name, "PetsApi");
  assert_eq!(output.file_name, "pets.ts");
  assert_eq!(output.example_file_name(), "pets.example.ts");
  assert_eq!(output.endpoints.len(), 2);
  assert!(!output.source.contains("create_pets"));

  let example = output.example.expect("example should be generated");
  assert!(example.contains("import { PetsApi } from \"./pets\";\n"), "{example}");
  assert!(example.contains("const API_KEY = \"secret\";\n"), "{example}");
  assert!(example.contains("await client.list_pets();\n"), "{example}");
  assert!(example.contains("await client.show_pet_by_id(\"example\");\n"), "{example}");
}

#[test]
fn test_concurrent_generations_are_independent() {
  let orchestrator = Orchestrator::new(petstore(), GenerateOptions::default());
  let expected = orchestrator.generate("petstore.json").expect("generation should succeed");

  let sources = thread::scope(|scope| {
    let handles = (0..4)
      .map(|_| scope.spawn(|| orchestrator.generate("petstore.json").map(|output| output.source)))
      .collect::<Vec<_>>();
    handles
      .into_iter()
      .map(|handle| handle.join().expect("generation thread panicked"))
      .collect::<Vec<_>>()
  });

  for source in sources {
    assert_eq!(source.expect("generation should succeed"), expected.source);
  }
}
