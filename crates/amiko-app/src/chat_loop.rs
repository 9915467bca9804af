//! Line-oriented terminal chat loop.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::controller::{ChatController, SubmitOutcome};

/// Run the interactive loop until EOF or `/quit`.
pub async fn run(
    controller: &mut ChatController,
    persona_name: &str,
    streaming: bool,
) -> std::io::Result<()> {
    if let Some(greeting) = controller.transcript().last() {
        println!("{persona_name}> {}", greeting.text);
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let input = line.trim();
        if input == "/quit" || input == "/exit" {
            break;
        }

        send(controller, persona_name, input, streaming).await;
    }

    println!("bye!");
    Ok(())
}

/// Send one message and print the reply.
pub async fn send(
    controller: &mut ChatController,
    persona_name: &str,
    text: &str,
    streaming: bool,
) -> SubmitOutcome {
    if text.trim().is_empty() {
        return SubmitOutcome::Empty;
    }

    if streaming {
        print!("{persona_name}> ");
        let _ = std::io::stdout().flush();

        let printed = Arc::new(AtomicBool::new(false));
        let printed_flag = printed.clone();
        let outcome = controller
            .submit_streaming(
                text,
                Box::new(move |chunk| {
                    print!("{chunk}");
                    let _ = std::io::stdout().flush();
                    printed_flag.store(true, Ordering::Relaxed);
                }),
            )
            .await;

        // A failed stream produced no chunks; show the appended fallback.
        if !printed.load(Ordering::Relaxed) {
            if let Some(last) = controller.transcript().last() {
                print!("{}", last.text);
            }
        }
        println!();
        outcome
    } else {
        let outcome = controller.submit(text).await;
        if let Some(last) = controller.transcript().last() {
            println!("{persona_name}> {}", last.text);
        }
        outcome
    }
}
