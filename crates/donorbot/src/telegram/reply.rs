//! Sending flow replies to a chat

use teloxide::prelude::*;

use super::keyboard::inline_keyboard;
use super::Bot;
use donorcore::core::config::telegram::MAX_MESSAGE_LEN;
use donorcore::Reply;

/// Message length as Telegram counts it (UTF-16 code units)
fn telegram_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Packs a result header and donor blocks into as few messages as fit
/// under `limit`.
///
/// Messages break between blocks where possible. A block longer than `limit`
/// on its own is broken on line breaks, then on character boundaries.
pub fn pack_messages(header: &str, blocks: &[String], limit: usize) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current = header.to_string();
    let mut current_len = telegram_len(&current);

    for block in blocks {
        let block_len = telegram_len(block);
        let pieces = if block_len > limit {
            log::warn!("Donor block of {} chars exceeds the message limit, splitting it", block_len);
            split_block(block, limit)
        } else {
            vec![block.clone()]
        };

        for piece in pieces {
            let piece_len = telegram_len(&piece);
            if !current.is_empty() && current_len + piece_len > limit {
                messages.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }

    if !current.is_empty() {
        messages.push(current);
    }
    messages
}

/// Breaks `block` into pieces of at most `limit` UTF-16 units.
fn split_block(block: &str, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut chunk = String::new();
    let mut chunk_len = 0;

    for line in block.split_inclusive('\n') {
        let line_len = telegram_len(line);
        if !chunk.is_empty() && chunk_len + line_len > limit {
            pieces.push(std::mem::take(&mut chunk));
            chunk_len = 0;
        }
        if line_len <= limit {
            chunk.push_str(line);
            chunk_len += line_len;
            continue;
        }

        // A single line over the limit
        for ch in line.chars() {
            if !chunk.is_empty() && chunk_len + ch.len_utf16() > limit {
                pieces.push(std::mem::take(&mut chunk));
                chunk_len = 0;
            }
            chunk.push(ch);
            chunk_len += ch.len_utf16();
        }
    }

    if !chunk.is_empty() {
        pieces.push(chunk);
    }
    pieces
}

/// Sends `reply` to `chat_id`, splitting long donor lists.
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &Reply) -> Result<(), teloxide::RequestError> {
    match reply {
        Reply::Text(text) => {
            bot.send_message(chat_id, text.as_str()).await?;
        }
        Reply::Options { text, rows } => {
            bot.send_message(chat_id, text.as_str())
                .reply_markup(inline_keyboard(rows))
                .await?;
        }
        Reply::Donors { header, blocks } => {
            let messages = pack_messages(header, blocks, MAX_MESSAGE_LEN);
            if messages.len() > 1 {
                log::debug!("Splitting {} donor(s) over {} messages", blocks.len(), messages.len());
            }
            for message in messages {
                bot.send_message(chat_id, message).await?;
            }
        }
    }
    Ok(())
}
