//! # 21点 (Blackjack) 核心逻辑库
//!
//! 这个 `core` crate 包含了 WavyJack 的全部游戏规则：牌组构建、随机抽牌、
//! 手牌点数计算、回合推进 (start / hit / stand)，以及在客户端与服务器之间
//! 携带游戏状态所用的状态串编解码。
//! 所有函数都不做 I/O，也不持有共享可变状态：每次调用接收上一个状态快照，
//! 返回一个新的快照，由上层 (frame 服务器、终端客户端) 负责保存和传递。

mod card;
mod codec;
mod error;
mod logic;
mod message;
mod state;

pub use card::*;

pub use codec::*;

pub use error::*;

pub use logic::*;

pub use message::*;

pub use state::*;
