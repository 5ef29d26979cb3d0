//! Servidor web Axum com WebSocket para visualização do parsing de mensagens IRC em tempo real

mod render;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use ircmsg_core::{
    demo::{demo_messages, demo_nicknames},
    pipeline::{MessageParser, ParseEvent, ParserConfig},
    TextPart,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Estado compartilhado da aplicação
struct AppState {
    /// Configuração base; os apelidos de cada requisição entram por cima
    base_config: ParserConfig,
}

#[derive(Deserialize)]
struct ParseRequest {
    text: String,
    #[serde(default)]
    nicknames: Option<Vec<String>>,
}

/// Mensagem WebSocket recebida do cliente
#[derive(Deserialize)]
struct WsRequest {
    text: String,
    #[serde(default)]
    nicknames: Option<Vec<String>>,
}

#[derive(Serialize)]
struct ParseResponse {
    plain_text: String,
    parts: Vec<TextPart>,
    html: String,
    total_parts: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let state = Arc::new(AppState {
        base_config: ParserConfig::default(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/parse", post(parse_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("🚀 Servidor ircmsg iniciado em http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Monta o parser para uma requisição, sobrepondo os apelidos recebidos
fn parser_for(state: &AppState, nicknames: Option<Vec<String>>) -> MessageParser {
    let config = ParserConfig {
        nicknames: nicknames.unwrap_or_default(),
        ..state.base_config.clone()
    };
    MessageParser::with_config(config)
}

/// Parsing via HTTP POST (sem streaming)
async fn parse_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ParseRequest>,
) -> impl IntoResponse {
    if req.text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Texto vazio"})),
        )
            .into_response();
    }

    let parser = parser_for(&state, req.nicknames);
    let (plain_text, parts) = parser.parse(&req.text);
    let html = render::render_message(&parts);

    Json(ParseResponse {
        plain_text,
        html,
        total_parts: parts.len(),
        parts,
    })
    .into_response()
}

/// Retorna as mensagens de demonstração e os apelidos de exemplo
async fn demo_texts_handler() -> impl IntoResponse {
    let messages: Vec<serde_json::Value> = demo_messages()
        .iter()
        .map(|(feature, text)| {
            serde_json::json!({
                "feature": feature,
                "text": text
            })
        })
        .collect();
    Json(serde_json::json!({
        "messages": messages,
        "nicknames": demo_nicknames(),
    }))
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe texto, executa o pipeline e envia os eventos
/// em tempo real, um a um, para a animação passo a passo
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // Tenta parsear como JSON {text, nicknames}; senão usa como texto puro
                let (text_str, nicknames) =
                    if let Ok(req) = serde_json::from_str::<WsRequest>(&text) {
                        (req.text, req.nicknames)
                    } else {
                        (text.to_string(), None)
                    };

                if text_str.is_empty() {
                    continue;
                }

                info!("Analisando via WebSocket: {} bytes", text_str.len());

                let parser = parser_for(&state, nicknames);
                let (tx_std, rx_std) = std::sync::mpsc::channel::<ParseEvent>();

                // Roda o pipeline em uma thread separada (é síncrono)
                let handle = tokio::task::spawn_blocking(move || {
                    parser.parse_streaming(&text_str, tx_std);
                });
                handle.await.ok();

                // Coleta os eventos numa Vec (o rx_std não é Send)
                let events: Vec<ParseEvent> = rx_std.try_iter().collect();

                for event in &events {
                    // O evento final ganha o HTML renderizado anexado
                    let json = match event {
                        ParseEvent::Done { parts, .. } => {
                            let mut value = match serde_json::to_value(event) {
                                Ok(v) => v,
                                Err(_) => continue,
                            };
                            value["data"]["html"] =
                                serde_json::Value::String(render::render_message(parts));
                            value.to_string()
                        }
                        _ => match serde_json::to_string(event) {
                            Ok(json) => json,
                            Err(_) => continue,
                        },
                    };

                    if socket.send(Message::Text(json.into())).await.is_err() {
                        return; // cliente desconectou
                    }
                    // Pequena pausa para animação visual (passo a passo)
                    tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
