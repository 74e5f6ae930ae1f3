use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use wavyjack_core::{apply_action, derive_state, encode_state, intents_for, Action, Card, GameState, Outcome};

/// 终端预览客户端：和 frame 一样，每一步都只通过状态串传递牌局
#[derive(Parser, Debug)]
#[command(name = "wavyjack_client", about = "Play WavyJack in the terminal")]
struct Args {
    /// 固定随机种子，便于复现牌局
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();
    let mut rng = args.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    // 和 frame 一样，客户端只保存状态串
    let mut blob: Option<String> = None;

    let mut record = Record::default();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    println!("--- WavyJack ---");
    println!("可用命令:");
    for (action, help) in [(Action::Start, "开始新的一局"), (Action::Hit, "要牌"), (Action::Stand, "停牌")] {
        if let Some(value) = action.value() {
            println!("  {value:<6} - {help}");
        }
    }
    println!("  <序号> - 点击对应按钮");
    println!("  exit   - 退出");
    println!();
    println!("{}", render_table(&derive_state(None)));

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = stdin.next_line().await? else {
            break;
        };
        let command = line.trim();
        if command == "exit" {
            break;
        }

        let previous = derive_state(blob.as_deref());
        let action = match command.parse::<i64>() {
            Ok(index) => Action::from_button_index(&previous, index),
            Err(_) => Action::from(command),
        };
        if action == Action::None {
            println!("未知命令: {}", command);
            continue;
        }

        let was_over = previous.game_over;
        let next = apply_action(previous, action, &mut rng)?;
        let encoded = encode_state(&next);
        debug!(?action, blob_len = encoded.len(), "状态已更新");
        blob = Some(encoded);

        println!("{}", render_table(&next));
        if !was_over {
            if let Some(outcome) = next.outcome() {
                record.add(outcome);
                println!("战绩: {}", record);
            }
        }
    }

    Ok(())
}

/// 本次运行的胜负统计
#[derive(Debug, Default, PartialEq, Eq)]
struct Record {
    wins: u32,
    losses: u32,
    ties: u32,
}

impl Record {
    fn add(&mut self, outcome: Outcome) {
        if outcome.player_wins() {
            self.wins += 1;
        } else if outcome == Outcome::Tie {
            self.ties += 1;
        } else {
            self.losses += 1;
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} 胜 {} 负 {} 平", self.wins, self.losses, self.ties)
    }
}

/// 用文字画出牌桌，和 frame 图片显示的信息一致
fn render_table(state: &GameState) -> String {
    let view = state.view();
    let player_cards = format_cards(state.player_hand.iter().map(Some));
    let dealer_cards = format_cards(
        state
            .dealer_hand
            .iter()
            .enumerate()
            .map(|(i, card)| (i == 0 || state.game_over).then_some(card)),
    );
    let dealer_score = view
        .dealer_score
        .map_or_else(|| "?".to_string(), |score| score.to_string());

    let mut lines = vec![
        format!("Your Hand: {}  {}", view.player_score, player_cards),
        format!("Dealer's Hand: {}  {}", dealer_score, dealer_cards),
    ];
    if let Some(outcome) = view.outcome {
        lines.push(outcome.message().to_string());
    }

    let buttons: Vec<String> = intents_for(state)
        .iter()
        .enumerate()
        .map(|(i, intent)| format!("[{}] {}", i + 1, intent.label))
        .collect();
    lines.push(buttons.join("  "));
    lines.join("\n")
}

// 暗牌显示为 "??"
fn format_cards<'a>(cards: impl Iterator<Item = Option<&'a Card>>) -> String {
    cards
        .map(|card| card.map_or_else(|| "??".to_string(), |c| c.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}
