use crate::state::GameState;
use serde::{Deserialize, Serialize};

// --- 客户端 -> 引擎 的动作 ---
// 按钮上携带的值被解析成 Action，引擎按枚举分派，而不是比较字符串。

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// 开始新的一局 (丢弃之前的任何状态)
    Start,
    /// 玩家要一张牌
    Hit,
    /// 玩家停牌，庄家补牌到 17 点
    Stand,
    /// 没有点击按钮，或者按钮值无法识别：状态原样透传
    None,
}

impl Action {
    /// 按钮值 (button value)
    pub fn value(&self) -> Option<&'static str> {
        match self {
            Action::Start => Some("start"),
            Action::Hit => Some("hit"),
            Action::Stand => Some("stand"),
            Action::None => None,
        }
    }

    /// 解析按钮值。无法识别的值不是错误，而是 `Action::None`。
    pub fn from_value(value: Option<&str>) -> Action {
        match value.map(str::trim) {
            Some("start") => Action::Start,
            Some("hit") => Action::Hit,
            Some("stand") => Action::Stand,
            _ => Action::None,
        }
    }

    /// frame 协议只回传被点击按钮的序号 (从 1 开始)。
    /// 按钮列表由上一个状态决定，所以这里根据上一个状态把序号还原成动作。
    /// 序号为负数或超出按钮数量时返回 `Action::None`。
    pub fn from_button_index(previous: &GameState, button_index: i64) -> Action {
        let intents = intents_for(previous);
        usize::try_from(button_index)
            .ok()
            .and_then(|idx| idx.checked_sub(1))
            .and_then(|idx| intents.get(idx))
            .map_or(Action::None, |intent| intent.action)
    }
}

impl From<&str> for Action {
    fn from(value: &str) -> Self {
        Action::from_value(Some(value))
    }
}

// --- 引擎 -> 渲染层 的按钮 ---

/// 一个可点击的按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub label: String,
    pub action: Action,
}

impl Intent {
    fn new(label: &str, action: Action) -> Self {
        Intent { label: label.to_string(), action }
    }
}

/// 给定状态下可用的按钮：总是有 "New Game"，牌局未结束时再加 "Hit" 和 "Stand"
pub fn intents_for(state: &GameState) -> Vec<Intent> {
    let mut intents = vec![Intent::new("New Game", Action::Start)];
    if !state.game_over {
        intents.push(Intent::new("Hit", Action::Hit));
        intents.push(Intent::new("Stand", Action::Stand));
    }
    intents
}
