use duplexgen::generators::{GeneratorOptions, GeneratorRegistry};
use duplexgen::normalize::{self, Options};
use openapiv3::OpenAPI;

const PETSTORE: &str = r##"
openapi: 3.0.3
info:
  title: pets
  version: "1.0"
servers:
  - url: https://pets.example.com/v1
paths:
  /pets:
    get:
      operationId: listPets
      tags: [pets]
      parameters:
        - name: status
          in: query
          schema:
            $ref: "#/components/schemas/PetStatus"
        - name: limit
          in: query
          schema:
            type: integer
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: "#/components/schemas/Pet"
    post:
      operationId: createPet
      tags: [pets]
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/NewPet"
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pet"
  /pets/{petId}:
    get:
      operationId: getPet
      tags: [pets]
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: string
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pet"
components:
  schemas:
    PetStatus:
      type: string
      enum: [available, sold]
    NewPet:
      type: object
      required: [name]
      properties:
        name:
          type: string
    Pet:
      type: object
      required: [id, name, status]
      properties:
        id:
          type: string
        name:
          type: string
        status:
          $ref: "#/components/schemas/PetStatus"
        note:
          type: string
          nullable: true
"##;

fn petstore_ir() -> duplexgen::ir::Spec {
    let doc: OpenAPI = serde_yaml::from_str(PETSTORE).unwrap();
    normalize::to_ir(&doc, &Options::default()).unwrap()
}

#[test]
fn go_server_covers_types_routes_and_decoding() {
    let spec = petstore_ir();
    let registry = GeneratorRegistry::new();
    let files = registry
        .get("go-server")
        .unwrap()
        .generate(
            &spec,
            &GeneratorOptions {
                go_package: "petsapi".to_string(),
            },
        )
        .unwrap();
    assert_eq!(files.len(), 1);
    let out = &files[0].content;

    assert!(out.contains("package petsapi"));
    assert!(out.contains("const BaseURL = \"https://pets.example.com/v1\""));

    // Named types.
    assert!(out.contains("type PetStatus string"));
    assert!(out.contains("PetStatusAvailable PetStatus = \"available\""));
    assert!(out.contains("type Pet struct {"));
    assert!(out.contains("Status PetStatus `json:\"status\"`"));
    assert!(out.contains("Note *string `json:\"note,omitempty\"`"));

    // One handler interface per tag, one method per route.
    assert!(out.contains("type PetsHandler interface {"));
    assert!(out.contains(
        "CreatePet(r *http.Request, body NewPet) (Pet, error)"
    ));
    assert!(out.contains(
        "GetPet(r *http.Request, path GetPetPath) (Pet, error)"
    ));
    // The inline array response gets a local named type.
    assert!(out.contains("type ListPetsResult []Pet"));
    assert!(out.contains(
        "ListPets(r *http.Request, query ListPetsQuery) (ListPetsResult, error)"
    ));

    // Registration and request decoding.
    assert!(out.contains("func RegisterPets(mux *http.ServeMux, h PetsHandler)"));
    assert!(out.contains("mux.HandleFunc(\"POST /pets\""));
    assert!(out.contains("mux.HandleFunc(\"GET /pets/{petId}\""));
    assert!(out.contains("req.PathValue(\"petId\")"));
    assert!(out.contains("strconv.ParseInt(raw, 10, 64)"));
    assert!(out.contains("json.NewDecoder(req.Body).Decode(&body)"));

    // Optional enum query param lands as a typed pointer.
    assert!(out.contains("Status *PetStatus"));
    assert!(out.contains("typed := PetStatus(v)"));
}

#[test]
fn ts_client_covers_types_and_calls() {
    let spec = petstore_ir();
    let registry = GeneratorRegistry::new();
    let files = registry
        .get("ts-client")
        .unwrap()
        .generate(&spec, &GeneratorOptions::default())
        .unwrap();
    assert_eq!(files.len(), 2);

    let types = &files[0].content;
    assert!(types.contains("export type PetStatus = \"available\" | \"sold\";"));
    assert!(types.contains("export interface Pet {"));
    assert!(types.contains("status: PetStatus;"));
    assert!(types.contains("note?: string | null;"));

    let client = &files[1].content;
    assert!(client.contains("export const BASE_URL = \"https://pets.example.com/v1\";"));
    assert!(client.contains("export const Pets = {"));
    assert!(client.contains(
        "async createPet(opts: ClientOptions, body: T.NewPet): Promise<T.Pet> {"
    ));
    assert!(client.contains(
        "async getPet(opts: ClientOptions, path: { petId: string }): Promise<T.Pet> {"
    ));
    // Query params render sorted by name; the inline array response stays
    // structural on the client side.
    assert!(client.contains(
        "async listPets(opts: ClientOptions, query?: { limit?: number; status?: T.PetStatus }): Promise<T.Pet[]> {"
    ));
    assert!(client
        .contains("`/pets/${encodeURIComponent(String(path.petId))}`"));
    assert!(client.contains("return request(opts, \"POST\", \"/pets\", body, undefined);"));
}

#[test]
fn generated_output_is_stable_across_runs() {
    let registry = GeneratorRegistry::new();
    let first = registry
        .get("go-server")
        .unwrap()
        .generate(&petstore_ir(), &GeneratorOptions::default())
        .unwrap();
    let second = registry
        .get("go-server")
        .unwrap()
        .generate(&petstore_ir(), &GeneratorOptions::default())
        .unwrap();
    assert_eq!(first[0].content, second[0].content);
}
