use crate::card::{create_deck, hand_value, Card, BLACKJACK, CARD_BACK_ASSET, DECK_SIZE};
use crate::message::{intents_for, Intent};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 一局 21 点的完整快照
///
/// 快照本身不可变：引擎每次都从旧快照派生出新快照。
/// 任何时刻 `player_hand ∪ dealer_hand ∪ deck` 都恰好是 52 张互不重复的牌。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    // 剩余牌堆，只会越抽越少，一局之内不会补牌
    pub deck: Vec<Card>,
    pub game_over: bool,
}

/// 由快照推导出的游戏阶段，不单独存储
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Over,
}

/// 一局结束后的结果 (站在玩家角度)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// 玩家爆牌，无论庄家如何都算输
    Bust,
    /// 庄家爆牌，玩家赢
    DealerBust,
    Win,
    Lose,
    Tie,
}

impl Outcome {
    /// 按优先级比较双方点数：玩家爆牌 > 庄家爆牌 > 比大小
    pub fn resolve(player_score: u32, dealer_score: u32) -> Outcome {
        if player_score > BLACKJACK {
            Outcome::Bust
        } else if dealer_score > BLACKJACK {
            Outcome::DealerBust
        } else if player_score > dealer_score {
            Outcome::Win
        } else if player_score < dealer_score {
            Outcome::Lose
        } else {
            Outcome::Tie
        }
    }

    pub fn player_wins(&self) -> bool {
        matches!(self, Outcome::DealerBust | Outcome::Win)
    }

    /// 结算画面上显示的文字
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Bust => "Bust! You lose!",
            Outcome::DealerBust => "Dealer busts! You win!",
            Outcome::Win => "You win!",
            Outcome::Lose => "You lose!",
            Outcome::Tie => "It's a tie!",
        }
    }
}

// --- GameState 的实现方法 ---

impl Default for GameState {
    /// 空牌局：双方无牌，牌堆是一副完整的新牌。每次调用都构造新值，不在请求之间共享。
    fn default() -> Self {
        GameState {
            player_hand: vec![],
            dealer_hand: vec![],
            deck: create_deck(),
            game_over: false,
        }
    }
}

impl GameState {
    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::Over
        } else if self.player_hand.is_empty() && self.dealer_hand.is_empty() {
            GamePhase::NotStarted
        } else {
            GamePhase::InProgress
        }
    }

    pub fn player_score(&self) -> u32 {
        hand_value(&self.player_hand)
    }

    pub fn dealer_score(&self) -> u32 {
        hand_value(&self.dealer_hand)
    }

    /// 只有牌局结束后才有结果
    pub fn outcome(&self) -> Option<Outcome> {
        self.game_over
            .then(|| Outcome::resolve(self.player_score(), self.dealer_score()))
    }

    /// 检查三处的牌是否恰好组成一副完整、无重复的牌
    pub fn is_consistent(&self) -> bool {
        let all_cards = self.player_hand.iter().chain(&self.dealer_hand).chain(&self.deck);
        let total = self.player_hand.len() + self.dealer_hand.len() + self.deck.len();
        let unique: HashSet<&Card> = all_cards.collect();
        total == DECK_SIZE && unique.len() == DECK_SIZE
    }

    /// 生成给渲染层使用的视图：牌局进行中时隐藏庄家的第二张牌和庄家点数
    pub fn view(&self) -> TableView {
        let player_cards = self.player_hand.iter().map(Card::asset_name).collect();
        let dealer_cards = self
            .dealer_hand
            .iter()
            .enumerate()
            .map(|(i, card)| {
                if i == 0 || self.game_over {
                    card.asset_name()
                } else {
                    CARD_BACK_ASSET.to_string()
                }
            })
            .collect();

        TableView {
            player_cards,
            dealer_cards,
            player_score: self.player_score(),
            dealer_score: self.game_over.then(|| self.dealer_score()),
            outcome: self.outcome(),
            intents: intents_for(self),
        }
    }
}

/// 渲染用的牌桌视图，不包含牌堆
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    // 卡牌图片文件名
    pub player_cards: Vec<String>,
    pub dealer_cards: Vec<String>,
    pub player_score: u32,
    // 牌局结束前为 None，显示为 "?"
    pub dealer_score: Option<u32>,
    pub outcome: Option<Outcome>,
    pub intents: Vec<Intent>,
}

// --- 单元测试 ---
