use std::sync::Mutex;

use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use env_logger::Env;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use wordchain_core::io::{get_filename, list_files, normalize_folder};
use wordchain_core::{ChainModel, Mode, Request};

const DATA_FOLDER: &str = "./data";
const MODEL_EXTENSION: &str = "txt";

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<String>,
	k: Option<i64>,
	mode: Option<String>, // "one", "all" or absent for top-k
	rng_seed: Option<u64>,
}

#[derive(Deserialize)]
struct ModelQuery {
	names: Option<String>,
}

struct SharedData {
	model: ChainModel,
	model_names: Vec<String>,
}

impl GenerateParams {
	/// Builds the generation request from the query.
	fn request(&self) -> Result<Request, String> {
		let seed = match &self.seed {
			Some(s) if !s.trim().is_empty() => s.trim(),
			_ => return Err("Missing or empty seed".into()),
		};

		let mode = self.mode.as_deref().map(Mode::from_label);
		if mode == Some(Mode::Unrecognized) {
			warn!("unrecognized mode {:?}", self.mode.as_deref().unwrap_or_default());
		}

		Ok(Request::from_signed_k(seed, self.k.unwrap_or(10), mode))
	}
}

/// Names of the models available in the data folder (file stems).
fn available_models() -> std::io::Result<Vec<String>> {
	list_files(normalize_folder(DATA_FOLDER), MODEL_EXTENSION)?
		.iter()
		.map(get_filename)
		.collect()
}

/// Checks requested model names against the available ones.
///
/// # Errors
/// Returns an error for a name holding a path component (`/`, `\`, `..`)
/// or a name with no matching file in the data folder.
fn validate_names(names: &[String], available: &[String]) -> Result<(), String> {
	for name in names {
		if name.contains(['/', '\\']) || name.contains("..") {
			return Err(format!("Invalid model name: {name}"));
		}
		if !available.contains(name) {
			return Err(format!("Unknown model: {name}"));
		}
	}
	Ok(())
}

/// Builds a model from the named `.txt` files of the data folder, merged.
fn load_models(names: &[String]) -> Result<ChainModel, String> {
	let folder = normalize_folder(DATA_FOLDER);
	let mut model = ChainModel::default();
	for name in names {
		let path = folder.join(format!("{name}.{MODEL_EXTENSION}"));
		let partial_model =
			ChainModel::from_file(&path).map_err(|e| format!("Failed to load model {name}: {e}"))?;
		info!("loaded model {name}: {} source words", partial_model.len());
		model.merge(&partial_model);
	}
	Ok(model)
}

/// GET /v1/generate
///
/// Generates words from the loaded chain based on query parameters.
/// Returns the words joined by a space.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let request = match query.request() {
		Ok(r) => r,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let words = match query.rng_seed {
		Some(seed) => request.run(&shared_data.model, &mut StdRng::seed_from_u64(seed)),
		None => request.run(&shared_data.model, &mut rand::rng()),
	};
	HttpResponse::Ok().body(words.join(" "))
}

#[get("/v1/models")]
async fn get_models() -> impl Responder {
	match available_models() {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models"),
	}
}

#[get("/v1/loaded_models")]
async fn get_loaded_models(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.model_names.join("\n"))
}

#[put("/v1/load_models")]
async fn put_model(data: web::Data<Mutex<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};

	let model_names: Vec<String> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.map(str::to_owned)
		.collect();

	let available = match available_models() {
		Ok(names) => names,
		Err(_) => return HttpResponse::InternalServerError().body("Failed to list models"),
	};
	if let Err(e) = validate_names(&model_names, &available) {
		return HttpResponse::BadRequest().body(e);
	}

	// Built outside the lock, the served model stays usable meanwhile
	let names = model_names.clone();
	let model = match web::block(move || load_models(&names)).await {
		Ok(Ok(m)) => m,
		Ok(Err(e)) => return HttpResponse::InternalServerError().body(e),
		Err(_) => return HttpResponse::InternalServerError().body("Model loading was interrupted"),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model = model;
	shared_data.model_names = model_names;

	HttpResponse::Ok().body("Models loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with an empty chain (every seed repeats itself) until models are
/// loaded through `/v1/load_models`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Models are the `.txt` files of `./data`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let shared_data = SharedData {
		model: ChainModel::default(),
		model_names: Vec::new(),
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_models)
			.service(put_model)
			.service(get_loaded_models)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
