use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use tracing::{debug, warn};
use wavyjack_core::{apply_action, derive_state_with, encode_state, Action, GameState, Intent};

use crate::config::Config;
use crate::error::AppError;
use crate::render::{escape_xml, render_svg};

pub type SharedConfig = Arc<Config>;

/// Farcaster frame 的 POST 请求体，只读取按钮序号和状态串
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameActionPayload {
    #[serde(default)]
    pub untrusted_data: UntrustedData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    // 不限制为 u8：越界的序号按未点击处理，而不是拒绝整个请求
    pub button_index: Option<i64>,
    pub state: Option<String>,
}

/// URL 查询参数：`action` 直接指定按钮值，`state` 携带状态串 (GET 和图片接口使用)
#[derive(Debug, Default, Deserialize)]
pub struct FrameQuery {
    pub action: Option<String>,
    pub state: Option<String>,
}

/// GET /api：根据查询参数渲染 frame，没有参数时是一个空牌局
pub async fn frame_get(
    State(config): State<SharedConfig>,
    Query(query): Query<FrameQuery>,
) -> Result<Html<String>, AppError> {
    let previous = previous_state(query.state.as_deref());
    let action = Action::from_value(query.action.as_deref());
    handle_frame(&config, previous, action)
}

/// POST /api：处理按钮点击
pub async fn frame_post(
    State(config): State<SharedConfig>,
    Query(query): Query<FrameQuery>,
    body: Bytes,
) -> Result<Html<String>, AppError> {
    let payload: FrameActionPayload = if body.is_empty() {
        FrameActionPayload::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::BadPayload(e.to_string()))?
    };

    let data = payload.untrusted_data;
    let previous = previous_state(data.state.as_deref().or(query.state.as_deref()));

    // 查询参数里的 action 优先于按钮序号
    let action = match (query.action.as_deref(), data.button_index) {
        (Some(value), _) => Action::from(value),
        (None, Some(index)) => Action::from_button_index(&previous, index),
        (None, None) => Action::None,
    };
    handle_frame(&config, previous, action)
}

/// GET /api/image：把状态串渲染成 SVG
pub async fn frame_image(
    State(config): State<SharedConfig>,
    Query(query): Query<FrameQuery>,
) -> impl IntoResponse {
    let state = previous_state(query.state.as_deref());
    let svg = render_svg(&state.view(), &config);
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "max-age=0"),
        ],
        svg,
    )
}

/// 还原上一个状态；状态串损坏时记录警告并退回空牌局
fn previous_state(blob: Option<&str>) -> GameState {
    derive_state_with(blob, |e| warn!(error = %e, "无法解析客户端状态，使用新牌局"))
}

fn handle_frame(config: &Config, previous: GameState, action: Action) -> Result<Html<String>, AppError> {
    let was_over = previous.game_over;
    let next = apply_action(previous, action, &mut rand::rng())?;

    if was_over && matches!(action, Action::Hit | Action::Stand) {
        debug!(?action, "牌局已结束，忽略动作");
    } else {
        debug!(
            ?action,
            player_score = next.player_score(),
            game_over = next.game_over,
            "动作已处理"
        );
    }

    Ok(Html(frame_html(config, &next)))
}

/// 生成 frame 页面：所有信息都放在 `<meta>` 标签里
pub fn frame_html(config: &Config, state: &GameState) -> String {
    let blob = encode_state(state);
    let base_url = config.base_url();
    let image_url = format!("{base_url}/api/image?state={blob}");
    let post_url = format!("{base_url}/api");
    let title = escape_xml(&config.title);

    let mut meta = vec![
        ("fc:frame".to_string(), "vNext".to_string()),
        ("fc:frame:image".to_string(), image_url.clone()),
        ("fc:frame:image:aspect_ratio".to_string(), "1.91:1".to_string()),
        ("fc:frame:post_url".to_string(), post_url),
        ("fc:frame:state".to_string(), blob),
        ("og:title".to_string(), config.title.clone()),
        ("og:image".to_string(), image_url),
    ];
    meta.extend(button_meta(&state.view().intents));

    let tags: String = meta
        .iter()
        .map(|(property, content)| {
            format!(
                "    <meta property=\"{}\" content=\"{}\"/>\n",
                escape_xml(property),
                escape_xml(content)
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <title>{title}</title>\n{tags}  </head>\n  <body></body>\n</html>\n"
    )
}

/// 按钮序号从 1 开始
fn button_meta(intents: &[Intent]) -> Vec<(String, String)> {
    intents
        .iter()
        .enumerate()
        .map(|(i, intent)| (format!("fc:frame:button:{}", i + 1), intent.label.clone()))
        .collect()
}
