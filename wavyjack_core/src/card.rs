use serde::{Deserialize, Serialize};
use std::fmt;

// --- 核心数据结构定义 ---

/// 21点的目标点数，超过即爆牌
pub const BLACKJACK: u32 = 21;

/// 一副牌的张数
pub const DECK_SIZE: usize = 52;

/// 花色 (Suit)
/// 序列化为小写复数英文名，与卡牌图片文件名一致
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,   // 红心 ♥️
    Diamonds, // 方块 ♦️
    Clubs,    // 梅花 ♣️
    Spades,   // 黑桃 ♠️
}

/// 点数 (Rank)
/// 序列化为牌面字符 "2".."10", "J", "Q", "K", "A"
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

/// 单张扑克牌 (Card)
/// 只由 (花色, 点数) 决定，没有其他身份
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    #[serde(rename = "value")]
    pub rank: Rank,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
    ];

    /// 牌面字符
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// 非 A 牌的固定点数。A 的点数取决于整手牌，由 `hand_value` 决定，这里返回 None。
    pub fn points(&self) -> Option<u32> {
        match self {
            Rank::Ace => None,
            Rank::Jack | Rank::Queen | Rank::King => Some(10),
            // Two..=Ten 的判别值是 0..=8
            numeral => Some(*numeral as u32 + 2),
        }
    }
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { suit, rank }
    }

    /// 卡牌图片文件名，例如 `a_of_spades.png`、`10_of_hearts.png`
    pub fn asset_name(&self) -> String {
        format!("{}_of_{}.png", self.rank.label().to_lowercase(), self.suit.name())
    }
}

/// 庄家暗牌使用的牌背图片
pub const CARD_BACK_ASSET: &str = "card_back.png";

// --- 实现辅助功能 ---

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Suit::Hearts => "♥️",
            Suit::Diamonds => "♦️",
            Suit::Clubs => "♣️",
            Suit::Spades => "♠️",
        })
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

// --- 牌组生成 ---

/// 创建一副完整的 52 张扑克牌
/// 顺序固定：先按花色 (红心、方块、梅花、黑桃)，再按点数 (2..A)。不洗牌，随机性只在抽牌时引入。
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for &suit in &Suit::ALL {
        for &rank in &Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

// --- 点数计算 ---

/// 计算一手牌的点数
///
/// 先累加所有非 A 牌，再依次处理每张 A：如果当前总点数加 11 不超过 21 就记 11，否则记 1。
/// 每张 A 都按当时累计的总点数单独判断 (从左到右的贪心)，而不是全局最优分配。
pub fn hand_value(hand: &[Card]) -> u32 {
    let mut value = 0;
    let mut aces = 0;
    for card in hand {
        match card.rank.points() {
            Some(points) => value += points,
            None => aces += 1,
        }
    }
    for _ in 0..aces {
        if value + 11 <= BLACKJACK {
            value += 11;
        } else {
            value += 1;
        }
    }
    value
}

/// 是否爆牌
pub fn is_bust(hand: &[Card]) -> bool {
    hand_value(hand) > BLACKJACK
}

// --- 单元测试 ---

#[cfg(test)]
mod tests {
    use super::*;
    use Rank::*;
    use Suit::*;
    use std::collections::HashSet;

    // 辅助函数，用于快速创建牌
    fn card(rank: Rank, suit: Suit) -> Card {
        Card { suit, rank }
    }

    #[test]
    fn test_create_deck_is_complete_and_ordered() {
        let deck = create_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let unique: HashSet<_> = deck.iter().collect();
        assert_eq!(unique.len(), DECK_SIZE, "牌组中不应有重复的牌");

        // 花色优先，点数其次
        assert_eq!(deck[0], card(Two, Hearts));
        assert_eq!(deck[12], card(Ace, Hearts));
        assert_eq!(deck[13], card(Two, Diamonds));
        assert_eq!(deck[51], card(Ace, Spades));
    }

    #[test]
    fn test_empty_hand_is_zero() {
        assert_eq!(hand_value(&[]), 0);
    }

    #[test]
    fn test_two_aces() {
        // 第一张 A 记 11，第二张 11+11=22>21 只能记 1
        assert_eq!(hand_value(&[card(Ace, Spades), card(Ace, Hearts)]), 12);
    }

    #[test]
    fn test_blackjack() {
        assert_eq!(hand_value(&[card(Ace, Spades), card(King, Hearts)]), 21);
    }

    #[test]
    fn test_face_cards_bust() {
        let hand = [card(King, Spades), card(Queen, Hearts), card(Two, Clubs)];
        assert_eq!(hand_value(&hand), 22);
        assert!(is_bust(&hand));
    }

    #[test]
    fn test_numerals_count_face_value() {
        let hand = [card(Two, Spades), card(Seven, Hearts), card(Ten, Clubs)];
        assert_eq!(hand_value(&hand), 19);
    }

    #[test]
    fn test_ace_after_high_total_counts_one() {
        // 非 A 牌总点数为 15，A 只能记 1
        let hand = [card(Ace, Clubs), card(Nine, Hearts), card(Six, Diamonds)];
        assert_eq!(hand_value(&hand), 16);
    }

    #[test]
    fn test_greedy_aces_are_resolved_one_by_one() {
        // 9 + A(11) = 20，第二张 A 记 1 -> 21
        let hand = [card(Nine, Clubs), card(Ace, Hearts), card(Ace, Spades)];
        assert_eq!(hand_value(&hand), 21);

        // 10 + A + A：第一张 A 时 10+11=21 可记 11，第二张只能记 1 -> 22
        // 贪心顺序会让这手牌爆掉，而全局最优是 12
        let hand = [card(Ten, Clubs), card(Ace, Hearts), card(Ace, Spades)];
        assert_eq!(hand_value(&hand), 22);
    }

    #[test]
    fn test_asset_names_are_lowercase() {
        assert_eq!(card(Ace, Spades).asset_name(), "a_of_spades.png");
        assert_eq!(card(Ten, Hearts).asset_name(), "10_of_hearts.png");
        assert_eq!(card(Queen, Diamonds).asset_name(), "q_of_diamonds.png");
    }

    #[test]
    fn test_card_serializes_with_value_field() {
        let json = serde_json::to_string(&card(Ace, Hearts)).unwrap();
        assert_eq!(json, r#"{"suit":"hearts","value":"A"}"#);

        let parsed: Card = serde_json::from_str(r#"{"suit":"clubs","value":"10"}"#).unwrap();
        assert_eq!(parsed, card(Ten, Clubs));
    }
}
