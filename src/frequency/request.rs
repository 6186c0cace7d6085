use super::error::{ApiError, ValidationErrors};
use super::types::FrequencyRequest;
use axum::Form;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;

pub const FIELD_TEXT: &str = "text";
pub const FIELD_TOP: &str = "top";
pub const FIELD_EXCLUDE: &str = "exclude";
pub const FIELD_FILE: &str = "file";

/// Room left on top of the text limit for the JSON or form framing around it.
pub const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Size constraints applied to incoming requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_text_bytes: usize,
}

impl RequestLimits {
    pub fn new(max_text_bytes: usize) -> Self {
        Self { max_text_bytes }
    }

    /// Upper bound for the raw HTTP body.
    pub fn body_limit(&self) -> usize {
        self.max_text_bytes.saturating_add(BODY_OVERHEAD_BYTES)
    }
}

/// Request fields exactly as they arrived, before any validation.
///
/// JSON bodies keep their original value types. Form fields (multipart or urlencoded)
/// are always strings, and repeated `exclude` / `exclude[]` fields are gathered into
/// an array.
#[derive(Debug, Default, Clone)]
pub struct RawInput {
    pub text: Option<Value>,
    pub top: Option<Value>,
    pub exclude: Option<Value>,
    pub file: Option<Vec<u8>>,
}

impl RawInput {
    /// Dispatches on the content type: multipart form data, urlencoded form data, or
    /// a JSON object (also assumed when no content type is sent).
    pub async fn from_request(request: Request, limits: RequestLimits) -> Result<Self, ApiError> {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase());

        match content_type.as_deref() {
            Some(value) if value.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(request, &())
                    .await
                    .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
                Self::from_multipart(multipart, limits).await
            }
            Some(value) if value.starts_with("application/x-www-form-urlencoded") => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
                    .await
                    .map_err(|rejection| {
                        body_error(rejection.status(), rejection.body_text(), limits)
                    })?;
                Ok(Self::from_form_pairs(pairs))
            }
            None => Self::read_json(request, limits).await,
            Some(value) if value.starts_with("application/json") || value.contains("+json") => {
                Self::read_json(request, limits).await
            }
            Some(other) => Err(ApiError::MalformedBody(format!(
                "unsupported content type {:?}",
                other
            ))),
        }
    }

    async fn read_json(request: Request, limits: RequestLimits) -> Result<Self, ApiError> {
        let body = Bytes::from_request(request, &())
            .await
            .map_err(|rejection| body_error(rejection.status(), rejection.body_text(), limits))?;
        Self::from_json_bytes(&body)
    }

    /// Builds the input from decoded `application/x-www-form-urlencoded` pairs.
    pub fn from_form_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut fields = FormFields::default();
        for (name, value) in pairs {
            fields.push(&name, value);
        }
        fields.finish(None)
    }

    pub fn from_json_bytes(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::MalformedBody(e.to_string()))?;
        let Value::Object(mut map) = value else {
            return Err(ApiError::MalformedBody(
                "expected a JSON object".to_string(),
            ));
        };

        Ok(Self {
            text: map.remove(FIELD_TEXT),
            top: map.remove(FIELD_TOP),
            exclude: map.remove(FIELD_EXCLUDE),
            file: None,
        })
    }

    pub async fn from_multipart(
        mut multipart: Multipart,
        limits: RequestLimits,
    ) -> Result<Self, ApiError> {
        let mut fields = FormFields::default();
        let mut file = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, limits))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == FIELD_FILE {
                let bytes = field.bytes().await.map_err(|e| multipart_error(e, limits))?;
                file = Some(bytes.to_vec());
            } else if FormFields::accepts(&name) {
                let value = field.text().await.map_err(|e| multipart_error(e, limits))?;
                fields.push(&name, value);
            } else {
                tracing::debug!("Ignoring unknown form field {:?}", name);
            }
        }

        Ok(fields.finish(file))
    }

    /// Resolves the text source and checks every field, collecting all field errors
    /// before failing. Oversized text fails on its own, ahead of other checks.
    pub fn validate(self, limits: RequestLimits) -> Result<FrequencyRequest, ApiError> {
        let mut errors = ValidationErrors::new();

        let text = resolve_text(self.text, self.file, &mut errors);
        if let Some(text) = &text
            && text.len() > limits.max_text_bytes
        {
            return Err(ApiError::PayloadTooLarge {
                limit: limits.max_text_bytes,
            });
        }

        let top = parse_top(self.top, &mut errors);
        let exclude = parse_exclude(self.exclude, &mut errors);

        match (text, top) {
            (Some(text), Some(top)) if errors.is_empty() => Ok(FrequencyRequest {
                text,
                top,
                exclude,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Form fields gathered from either form encoding. Values are always strings, and
/// repeated `exclude` / `exclude[..]` fields collect into an array.
#[derive(Debug, Default)]
struct FormFields {
    text: Option<String>,
    top: Option<String>,
    exclude: Option<Vec<Value>>,
}

impl FormFields {
    fn is_exclude(name: &str) -> bool {
        name == FIELD_EXCLUDE || name.starts_with("exclude[")
    }

    fn accepts(name: &str) -> bool {
        name == FIELD_TEXT || name == FIELD_TOP || Self::is_exclude(name)
    }

    fn push(&mut self, name: &str, value: String) {
        match name {
            FIELD_TEXT => self.text = Some(value),
            FIELD_TOP => self.top = Some(value),
            other if Self::is_exclude(other) => {
                self.exclude
                    .get_or_insert_with(Vec::new)
                    .push(Value::String(value));
            }
            other => tracing::debug!("Ignoring unknown form field {:?}", other),
        }
    }

    fn finish(self, file: Option<Vec<u8>>) -> RawInput {
        RawInput {
            text: self.text.map(Value::String),
            top: self.top.map(Value::String),
            exclude: self.exclude.map(Value::Array),
            file,
        }
    }
}

fn body_error(status: StatusCode, body_text: String, limits: RequestLimits) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge {
            limit: limits.max_text_bytes,
        }
    } else {
        ApiError::MalformedBody(body_text)
    }
}

fn multipart_error(error: MultipartError, limits: RequestLimits) -> ApiError {
    body_error(error.status(), error.body_text(), limits)
}

fn resolve_text(
    text: Option<Value>,
    file: Option<Vec<u8>>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    if let Some(bytes) = file
        && !bytes.is_empty()
    {
        return Some(String::from_utf8_lossy(&bytes).into_owned());
    }

    match text {
        None | Some(Value::Null) => {
            errors.add(FIELD_TEXT, "The text field is required.");
            None
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            errors.add(FIELD_TEXT, "The text field is required.");
            None
        }
        Some(Value::String(text)) => Some(text),
        Some(_) => {
            errors.add(FIELD_TEXT, "The text field must be a string.");
            None
        }
    }
}

fn parse_top(top: Option<Value>, errors: &mut ValidationErrors) -> Option<usize> {
    const NOT_INTEGER: &str = "The top field must be an integer.";
    const TOO_SMALL: &str = "The top field must be at least 1.";

    let parsed: Result<u64, &str> = match top {
        None | Some(Value::Null) => Err("The top field is required."),
        Some(Value::Number(number)) => match (number.as_u64(), number.as_i64()) {
            (Some(n), _) => Ok(n),
            (None, Some(_)) => Err(TOO_SMALL),
            (None, None) => Err(NOT_INTEGER),
        },
        Some(Value::String(raw)) => {
            let raw = raw.trim();
            if let Ok(n) = raw.parse::<u64>() {
                Ok(n)
            } else if raw.parse::<i64>().is_ok() {
                Err(TOO_SMALL)
            } else {
                Err(NOT_INTEGER)
            }
        }
        Some(_) => Err(NOT_INTEGER),
    };

    match parsed {
        Ok(0) => {
            errors.add(FIELD_TOP, TOO_SMALL);
            None
        }
        Ok(n) => Some(usize::try_from(n).unwrap_or(usize::MAX)),
        Err(message) => {
            errors.add(FIELD_TOP, message);
            None
        }
    }
}

fn parse_exclude(exclude: Option<Value>, errors: &mut ValidationErrors) -> Vec<String> {
    match exclude {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut words = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::String(word) => words.push(word),
                    Value::Null => {}
                    _ => errors.add(
                        format!("{}.{}", FIELD_EXCLUDE, index),
                        format!("The {}.{} field must be a string.", FIELD_EXCLUDE, index),
                    ),
                }
            }
            words
        }
        Some(_) => {
            errors.add(FIELD_EXCLUDE, "The exclude field must be an array.");
            Vec::new()
        }
    }
}
