use crate::config::Config;
use std::fmt::Write;
use wavyjack_core::TableView;

// 画布尺寸，1.91:1
pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const CARD_WIDTH: u32 = 80;
const CARD_HEIGHT: u32 = 120;
const CARD_GAP: u32 = 5;

/// 把牌桌视图渲染成 SVG 图片
///
/// 布局自上而下：标题、玩家点数与手牌、庄家点数与手牌、结算文字 (仅牌局结束时)。
/// 卡牌图片引用 `{base_url}/api/assets/` 下的静态资源。
pub fn render_svg(view: &TableView, config: &Config) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = write!(
        svg,
        r##"<rect width="100%" height="100%" fill="#0b5d2a"/><image href="{}" x="0" y="0" width="{WIDTH}" height="{HEIGHT}" preserveAspectRatio="xMidYMid slice"/>"##,
        escape_xml(&config.asset_url("background.png"))
    );

    text(&mut svg, 70, 44, &config.title);

    text(&mut svg, 150, 32, &format!("Your Hand: {}", view.player_score));
    card_row(&mut svg, 175, &view.player_cards, config);

    let dealer_score = view
        .dealer_score
        .map_or_else(|| "?".to_string(), |score| score.to_string());
    text(&mut svg, 345, 32, &format!("Dealer's Hand: {dealer_score}"));
    card_row(&mut svg, 370, &view.dealer_cards, config);

    if let Some(outcome) = view.outcome {
        text(&mut svg, 560, 36, outcome.message());
    }

    svg.push_str("</svg>");
    svg
}

/// 水平居中的一行文字
fn text(svg: &mut String, y: u32, size: u32, content: &str) {
    let _ = write!(
        svg,
        r#"<text x="{}" y="{y}" font-family="sans-serif" font-size="{size}" font-weight="bold" fill="white" text-anchor="middle">{}</text>"#,
        WIDTH / 2,
        escape_xml(content)
    );
}

/// 水平居中的一行卡牌
fn card_row(svg: &mut String, y: u32, assets: &[String], config: &Config) {
    let count = assets.len() as u32;
    let row_width = (count * (CARD_WIDTH + CARD_GAP)).saturating_sub(CARD_GAP);
    let start_x = WIDTH.saturating_sub(row_width) / 2;
    for (i, asset) in assets.iter().enumerate() {
        let x = start_x + i as u32 * (CARD_WIDTH + CARD_GAP);
        let _ = write!(
            svg,
            r#"<image href="{}" x="{x}" y="{y}" width="{CARD_WIDTH}" height="{CARD_HEIGHT}"/>"#,
            escape_xml(&config.asset_url(asset))
        );
    }
}

pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
