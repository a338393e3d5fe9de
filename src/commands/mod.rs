mod ask;
mod recipes;

use crate::state::Context;

/// Cookbook - recipes and ingredient tips
#[poise::command(
    slash_command,
    subcommands("ask::ask", "recipes::recipe", "recipes::search", "recipes::recipes")
)]
pub async fn cookbook(_ctx: Context<'_>) -> Result<(), anyhow::Error> {
    Ok(())
}

/// Send a message in Discord-safe chunks (max 1990 chars).
/// Uses ctx.say() for all chunks so follow-ups go through the interaction
/// webhook, which doesn't require Send Messages channel permission.
pub(crate) async fn send_chunked(ctx: &Context<'_>, text: &str) -> Result<(), anyhow::Error> {
    for chunk in chunks(text, 1990) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

/// Split `text` into pieces of at most `max` bytes, preferring line then
/// word boundaries. A char wider than `max` becomes its own chunk.
fn chunks(text: &str, max: usize) -> Vec<&str> {
    let mut out = Vec::new();
    let mut remaining = text;
    while !remaining.is_empty() {
        let mut chunk_len = remaining.len().min(max);
        while !remaining.is_char_boundary(chunk_len) {
            chunk_len -= 1;
        }
        if chunk_len == 0 {
            // A single char wider than `max` still has to go out whole.
            chunk_len = remaining.chars().next().map_or(remaining.len(), char::len_utf8);
        }
        let split_at = if chunk_len < remaining.len() {
            remaining[..chunk_len]
                .rfind('\n')
                .or_else(|| remaining[..chunk_len].rfind(' '))
                .map(|i| i + 1)
                .unwrap_or(chunk_len)
        } else {
            chunk_len
        };
        out.push(&remaining[..split_at]);
        remaining = &remaining[split_at..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(chunks("hello", 1990), vec!["hello"]);
        assert!(chunks("", 1990).is_empty());
    }

    #[test]
    fn test_split_on_newline() {
        let text = "first line\nsecond line";
        assert_eq!(chunks(text, 15), vec!["first line\n", "second line"]);
    }

    #[test]
    fn test_split_respects_char_boundary() {
        let text = "ééééé";
        let parts = chunks(text, 3);
        assert_eq!(parts.concat(), text);
        assert!(parts.iter().all(|p| p.len() <= 3));
    }

    #[test]
    fn test_char_wider_than_max_is_own_chunk() {
        assert_eq!(chunks("éé", 1), vec!["é", "é"]);
        assert_eq!(chunks("a🍋b", 2), vec!["a", "🍋", "b"]);
    }
}
