use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::auth::TOKEN_COOKIE;
use crate::state::AppState;

/// Static Swagger UI shell; the real content is the schema it loads.
const DOCS_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>MathGate API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/docs", get(docs_page))
        .route("/openapi.json", get(openapi_document))
}

async fn docs_page() -> Html<&'static str> {
    Html(DOCS_PAGE)
}

async fn openapi_document() -> Json<Value> {
    Json(json!({
        "openapi": "3.0.3",
        "info": {
            "title": "MathGate API",
            "description": "Register, log in, and run token-gated arithmetic.",
            "version": "1.0.0"
        },
        "paths": {
            "/register": {
                "post": {
                    "summary": "Create an account",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/RegisterRequest" }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "Account created; also sets the auth cookie",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/AuthResponse" }
                                }
                            }
                        },
                        "400": { "$ref": "#/components/responses/BadRequest" }
                    }
                }
            },
            "/login": {
                "post": {
                    "summary": "Log in with email and password",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/LoginRequest" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Logged in; also sets the auth cookie",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/AuthResponse" }
                                }
                            }
                        },
                        "400": { "$ref": "#/components/responses/BadRequest" }
                    }
                }
            },
            "/calculate": {
                "post": {
                    "summary": "Apply an arithmetic operation to two numbers",
                    "security": [ { "bearerAuth": [] }, { "cookieAuth": [] } ],
                    "parameters": [
                        {
                            "name": "operation",
                            "in": "header",
                            "required": true,
                            "schema": {
                                "type": "string",
                                "enum": ["add", "subtract", "multiply", "divide"]
                            }
                        }
                    ],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CalculateRequest" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Arithmetic result",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": { "result": { "type": "number" } }
                                    }
                                }
                            }
                        },
                        "400": { "$ref": "#/components/responses/BadRequest" },
                        "401": { "$ref": "#/components/responses/Unauthorized" }
                    }
                }
            }
        },
        "components": {
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" },
                "cookieAuth": { "type": "apiKey", "in": "cookie", "name": TOKEN_COOKIE }
            },
            "schemas": {
                "RegisterRequest": {
                    "type": "object",
                    "required": ["name", "email", "password"],
                    "properties": {
                        "name": { "type": "string" },
                        "email": { "type": "string" },
                        "password": { "type": "string" }
                    }
                },
                "LoginRequest": {
                    "type": "object",
                    "required": ["email", "password"],
                    "properties": {
                        "email": { "type": "string" },
                        "password": { "type": "string" }
                    }
                },
                "CalculateRequest": {
                    "type": "object",
                    "required": ["number1", "number2"],
                    "properties": {
                        "number1": { "description": "Number or numeric string" },
                        "number2": { "description": "Number or numeric string" }
                    }
                },
                "AuthResponse": {
                    "type": "object",
                    "properties": {
                        "userId": { "type": "integer" },
                        "name": { "type": "string" },
                        "email": { "type": "string" },
                        "token": { "type": "string" }
                    }
                },
                "ErrorMessage": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" }
                    }
                }
            },
            "responses": {
                "BadRequest": {
                    "description": "Invalid input",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/ErrorMessage" }
                        }
                    }
                },
                "Unauthorized": {
                    "description": "Missing, expired, or invalid token",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/ErrorMessage" }
                        }
                    }
                }
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_covers_every_route() {
        let Json(doc) = openapi_document().await;
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/register"));
        assert!(paths.contains_key("/login"));
        assert!(paths.contains_key("/calculate"));
    }

    #[tokio::test]
    async fn schema_declares_both_token_transports() {
        let Json(doc) = openapi_document().await;
        let schemes = doc["components"]["securitySchemes"].as_object().unwrap();
        assert_eq!(schemes["bearerAuth"]["scheme"], "bearer");
        assert_eq!(schemes["cookieAuth"]["name"], TOKEN_COOKIE);
    }

    #[test]
    fn docs_page_points_at_the_schema() {
        assert!(DOCS_PAGE.contains("/openapi.json"));
    }
}
