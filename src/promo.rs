use chrono::NaiveDate;
use rand::Rng;
use serde_json::{Value, json};
use tracing::warn;

const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("chat completion response had no message content")]
    MalformedResponse,
}

/// Produces the promotional copy for an offer. Demo deployments pick a
/// canned template locally; live deployments ask OpenAI and fall back to a
/// stock sentence when the request fails.
#[derive(Clone)]
pub enum OfferComposer {
    Canned,
    OpenAi {
        client: reqwest::Client,
        api_key: String,
    },
}

impl OfferComposer {
    pub async fn compose(&self, restaurant_name: &str, title: &str, end_date: &str) -> String {
        let date = format_end_date(end_date);
        match self {
            OfferComposer::Canned => canned_offer(restaurant_name, title, &date),
            OfferComposer::OpenAi { client, api_key } => {
                match chat_completion(client, api_key, restaurant_name, title, &date).await {
                    Ok(message) => message,
                    Err(err) => {
                        warn!("chat completion failed, using fallback copy: {err}");
                        fallback_offer(restaurant_name, title, &date)
                    }
                }
            }
        }
    }
}

async fn chat_completion(
    client: &reqwest::Client,
    api_key: &str,
    restaurant_name: &str,
    title: &str,
    date: &str,
) -> Result<String, ComposeError> {
    let prompt = format!(
        "Write a fun and creative restaurant promotion. Restaurant: '{restaurant_name}', \
         Special Offer: '{title}', ends on {date}. Make it engaging and persuasive."
    );
    let body = json!({
        "model": OPENAI_MODEL,
        "messages": [
            {
                "role": "system",
                "content": "You are a creative marketing assistant for restaurants.",
            },
            {"role": "user", "content": prompt},
        ],
        "max_tokens": 150,
        "temperature": 0.8,
    });

    let response: Value = client
        .post(OPENAI_CHAT_COMPLETIONS_URL)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or(ComposeError::MalformedResponse)?;
    Ok(content.trim().to_string())
}

fn canned_offer(restaurant_name: &str, title: &str, date: &str) -> String {
    let mut templates = vec![
        format!(
            "🎉 Hey foodies! {restaurant_name} is serving up '{title}' until {date}. Don’t miss out! 🍽️"
        ),
        format!("🔥 Hot deal alert! '{title}' at {restaurant_name} – grab it before {date}!"),
        format!("🥳 Time to treat yourself! Enjoy '{title}' at {restaurant_name} before {date}."),
        format!(
            "🍕 Delicious deal incoming! '{title}' at {restaurant_name} is available until {date}. Bring your friends!"
        ),
    ];
    let index = rand::thread_rng().gen_range(0..templates.len());
    templates.swap_remove(index)
}

fn fallback_offer(restaurant_name: &str, title: &str, date: &str) -> String {
    format!("{restaurant_name} has a special offer: '{title}', valid until {date}.")
}

/// Renders `2025-09-14` as `September 14, 2025`. Anything that does not
/// parse is passed through verbatim.
fn format_end_date(end_date: &str) -> String {
    match NaiveDate::parse_from_str(end_date, "%Y-%m-%d") {
        Ok(date) => date.format("%B %d, %Y").to_string(),
        Err(_) => end_date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_date_is_rendered_long_form() {
        assert_eq!(format_end_date("2025-09-14"), "September 14, 2025");
        assert_eq!(format_end_date("2026-01-02"), "January 02, 2026");
    }

    #[test]
    fn unparseable_end_date_passes_through() {
        assert_eq!(format_end_date("soon"), "soon");
        assert_eq!(format_end_date(""), "");
        assert_eq!(format_end_date("14/09/2025"), "14/09/2025");
    }

    #[test]
    fn canned_offer_mentions_the_restaurant_and_title() {
        for _ in 0..32 {
            let copy = canned_offer("Casa Lupe", "Taco Tuesday", "September 14, 2025");
            assert!(copy.contains("Casa Lupe"), "missing restaurant in: {copy}");
            assert!(copy.contains("Taco Tuesday"), "missing title in: {copy}");
            assert!(copy.contains("September 14, 2025"), "missing date in: {copy}");
        }
    }

    #[test]
    fn fallback_copy_is_deterministic() {
        assert_eq!(
            fallback_offer("Casa Lupe", "Taco Tuesday", "September 14, 2025"),
            "Casa Lupe has a special offer: 'Taco Tuesday', valid until September 14, 2025."
        );
    }

    #[tokio::test]
    async fn canned_composer_formats_the_end_date() {
        let composer = OfferComposer::Canned;
        let copy = composer.compose("Casa Lupe", "Taco Tuesday", "2025-09-14").await;
        assert!(copy.contains("September 14, 2025"), "raw date leaked into: {copy}");
    }
}
