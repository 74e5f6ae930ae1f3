use crate::card::*;
use crate::error::{GameError, GameResult};
use crate::message::Action;
use crate::state::*;
use rand::Rng;

/// 庄家的停牌点数：低于 17 必须继续要牌
pub const DEALER_STANDS_AT: u32 = 17;

// --- 核心游戏流程函数 ---
// 所有函数都接收旧状态的引用并返回新状态，随机数源由调用方传入。

/// 从牌堆中等概率随机抽一张牌
///
/// 返回抽到的牌和剩余牌堆，剩余牌堆保持原有顺序。
/// 牌堆为空时返回 `GameError::DeckExhausted`。
pub fn draw_card<R: Rng + ?Sized>(deck: &[Card], rng: &mut R) -> GameResult<(Card, Vec<Card>)> {
    if deck.is_empty() {
        return Err(GameError::DeckExhausted);
    }
    let index = rng.random_range(0..deck.len());
    let mut remaining = deck.to_vec();
    let card = remaining.remove(index);
    Ok((card, remaining))
}

/// 开始新的一局
///
/// 使用一副新牌，给玩家发两张、庄家发一张。之前的状态 (无论是否结束) 全部丢弃。
pub fn start_new_game<R: Rng + ?Sized>(rng: &mut R) -> GameResult<GameState> {
    let deck = create_deck();
    let (card1, deck) = draw_card(&deck, rng)?;
    let (card2, deck) = draw_card(&deck, rng)?;
    let (dealer_card, deck) = draw_card(&deck, rng)?;

    Ok(GameState {
        player_hand: vec![card1, card2],
        dealer_hand: vec![dealer_card],
        deck,
        game_over: false,
    })
}

/// 玩家要牌
///
/// 抽一张牌加入玩家手牌，如果爆牌则牌局结束。
pub fn hit<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> GameResult<GameState> {
    if state.game_over {
        return Err(GameError::GameAlreadyOver);
    }

    let (card, deck) = draw_card(&state.deck, rng)?;
    let mut player_hand = state.player_hand.clone();
    player_hand.push(card);
    let game_over = is_bust(&player_hand);

    Ok(GameState {
        player_hand,
        deck,
        game_over,
        ..state.clone()
    })
}

/// 玩家停牌
///
/// 庄家持续要牌直到点数达到 17 (或牌堆抽空)，之后牌局一定结束。
pub fn stand<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> GameResult<GameState> {
    if state.game_over {
        return Err(GameError::GameAlreadyOver);
    }

    let mut dealer_hand = state.dealer_hand.clone();
    let mut deck = state.deck.clone();
    while hand_value(&dealer_hand) < DEALER_STANDS_AT && !deck.is_empty() {
        let (card, remaining) = draw_card(&deck, rng)?;
        dealer_hand.push(card);
        deck = remaining;
    }

    Ok(GameState {
        dealer_hand,
        deck,
        game_over: true,
        ..state.clone()
    })
}

/// 根据动作推进牌局
///
/// 这是上层唯一需要调用的入口：
/// - `Start` 总是开新局。
/// - 对已结束的牌局 `Hit` / `Stand` 不做任何事，原状态透传。
/// - `None` 原状态透传。
pub fn apply_action<R: Rng + ?Sized>(previous: GameState, action: Action, rng: &mut R) -> GameResult<GameState> {
    let next = match action {
        Action::Start => start_new_game(rng),
        Action::Hit => hit(&previous, rng),
        Action::Stand => stand(&previous, rng),
        Action::None => return Ok(previous),
    };

    match next {
        Err(GameError::GameAlreadyOver) => Ok(previous),
        other => other,
    }
}

// --- 单元测试 ---
