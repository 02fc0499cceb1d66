//! The number guessing game, written as a plain linear script.

use futures::future::LocalBoxFuture;
use futures::FutureExt;

use super::context::RoutineContext;
use super::driver::Routine;
use super::error::RoutineError;

pub const NAME_FIELD: &str = "name";
pub const GUESS_FIELD: &str = "guess";
pub const CHOICE_FIELD: &str = "choice";

/// Asks for a name, then plays rounds of "guess my number" until the player
/// declines another round.
#[derive(Debug, Clone, Copy)]
pub struct GuessingGame {
    low: i64,
    high: i64,
}

impl GuessingGame {
    pub fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }
}

impl Default for GuessingGame {
    fn default() -> Self {
        Self::new(1, 100)
    }
}

impl Routine for GuessingGame {
    fn name(&self) -> &str {
        "guessing-game"
    }

    fn run(&self, ctx: RoutineContext) -> LocalBoxFuture<'static, Result<(), RoutineError>> {
        let game = *self;
        async move {
            let name = ctx
                .prompt_text("Greetings. What is your name? ", NAME_FIELD)
                .await?;
            ctx.display(format!("Hello, {name}.")).await?;

            loop {
                play_round(&ctx, game).await?;

                let again = ctx.prompt_yes_no("Play again? ", CHOICE_FIELD).await?;
                if !again {
                    break;
                }
            }

            ctx.display("Thank you for playing.").await
        }
        .boxed_local()
    }
}

async fn play_round(ctx: &RoutineContext, game: GuessingGame) -> Result<(), RoutineError> {
    ctx.display(format!(
        "I am thinking of a number between {} and {}.",
        game.low, game.high
    ))
    .await?;
    let secret = ctx.random_int(game.low, game.high).await?;

    let mut guesses = 0u32;
    loop {
        let guess = ctx.prompt_int("Guess: ", GUESS_FIELD).await?;
        guesses += 1;
        if guess == secret {
            break;
        } else if secret < guess {
            ctx.display("Try lower.").await?;
        } else {
            ctx.display("Try higher.").await?;
        }
    }

    ctx.display(format!("Correct in {guesses} guesses.")).await
}
