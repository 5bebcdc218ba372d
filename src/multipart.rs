//! In-memory `multipart/form-data` encoder.

// crates.io
use rand::{Rng, distr::Alphanumeric};

const BOUNDARY_LEN: usize = 32;
const CRLF: &str = "\r\n";

/// Content type applied to file parts.
pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Clone, Debug)]
enum Part {
	Text { name: String, value: String },
	File { name: String, file_name: String, content_type: String, data: Vec<u8> },
}

/// Form whose fields are encoded into a single owned body.
#[derive(Clone, Debug)]
pub struct MultipartForm {
	boundary: String,
	parts: Vec<Part>,
}
impl MultipartForm {
	/// Creates an empty form with a random boundary.
	pub fn new() -> Self {
		Self::with_boundary(random_boundary())
	}

	/// Creates an empty form with a fixed boundary.
	pub fn with_boundary(boundary: impl Into<String>) -> Self {
		Self { boundary: boundary.into(), parts: Vec::new() }
	}

	/// Boundary separating the parts.
	pub fn boundary(&self) -> &str {
		&self.boundary
	}

	/// Appends a text field.
	pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.parts.push(Part::Text { name: name.into(), value: value.into() });

		self
	}

	/// Appends a file part sent as `application/octet-stream`.
	pub fn file(
		self,
		name: impl Into<String>,
		file_name: impl Into<String>,
		data: impl Into<Vec<u8>>,
	) -> Self {
		self.file_with_type(name, file_name, OCTET_STREAM, data)
	}

	/// Appends a file part with an explicit content type.
	pub fn file_with_type(
		mut self,
		name: impl Into<String>,
		file_name: impl Into<String>,
		content_type: impl Into<String>,
		data: impl Into<Vec<u8>>,
	) -> Self {
		self.parts.push(Part::File {
			name: name.into(),
			file_name: file_name.into(),
			content_type: content_type.into(),
			data: data.into(),
		});

		self
	}

	/// Value for the request's `Content-Type` header.
	pub fn content_type(&self) -> String {
		format!("multipart/form-data; boundary={}", self.boundary)
	}

	/// Encodes every part followed by the closing delimiter.
	pub fn encode(&self) -> Vec<u8> {
		let mut body = Vec::new();

		for part in &self.parts {
			body.extend_from_slice(format!("--{}{CRLF}", self.boundary).as_bytes());

			match part {
				Part::Text { name, value } => {
					body.extend_from_slice(
						format!(
							"Content-Disposition: form-data; name=\"{}\"{CRLF}{CRLF}",
							escape_quoted(name)
						)
						.as_bytes(),
					);
					body.extend_from_slice(value.as_bytes());
				},
				Part::File { name, file_name, content_type, data } => {
					body.extend_from_slice(
						format!(
							"Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"{CRLF}\
							 Content-Type: {content_type}{CRLF}{CRLF}",
							escape_quoted(name),
							escape_quoted(file_name),
						)
						.as_bytes(),
					);
					body.extend_from_slice(data);
				},
			}

			body.extend_from_slice(CRLF.as_bytes());
		}

		body.extend_from_slice(format!("--{}--{CRLF}", self.boundary).as_bytes());

		body
	}
}
impl Default for MultipartForm {
	fn default() -> Self {
		Self::new()
	}
}

fn random_boundary() -> String {
	rand::rng().sample_iter(Alphanumeric).take(BOUNDARY_LEN).map(char::from).collect()
}

fn escape_quoted(value: &str) -> String {
	value.replace('\\', "\\\\").replace('"', "\\\"").replace(['\r', '\n'], " ")
}
