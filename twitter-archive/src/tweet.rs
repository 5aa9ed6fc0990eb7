use serde::Serialize;

use crate::archive::RawTweet;
use crate::config::ExtractOptions;
use crate::error::MalformedTweetError;
use crate::table::Row;
use crate::util::{iso_date, parse_created_at, unix_timestamp};

const RETWEET_PREFIX: &str = "RT @";

/// Fields every row derived from a tweet carries.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TweetHeader {
    pub id: String,
    pub date: String,
    pub iso_date: String,
    pub unix_timestamp: f64,
    pub url: String,
    pub possible_rt: bool,
    pub text: Option<String>,
}

impl TweetHeader {
    pub(crate) fn parse(
        tweet: &RawTweet,
        options: &ExtractOptions,
    ) -> Result<Self, MalformedTweetError> {
        let id = tweet
            .id_str
            .as_ref()
            .ok_or(MalformedTweetError::MissingField("id_str"))?;
        let date = tweet
            .created_at
            .as_ref()
            .ok_or(MalformedTweetError::MissingField("created_at"))?;
        let text = tweet
            .full_text
            .as_ref()
            .ok_or(MalformedTweetError::MissingField("full_text"))?;

        let time = parse_created_at(date).map_err(|e| MalformedTweetError::InvalidDate {
            value: date.clone(),
            msg: e.to_string(),
        })?;

        Ok(Self {
            id: id.clone(),
            date: date.clone(),
            iso_date: iso_date(&time, options.zone),
            unix_timestamp: unix_timestamp(&time),
            url: format!("{}{}", options.status_base_url, id),
            possible_rt: text.as_deref().is_some_and(|t| t.starts_with(RETWEET_PREFIX)),
            text: text.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TweetRecord {
    pub tweet_id: String,
    pub tweet_date: String,
    pub tweet_iso_date: String,
    pub tweet_unix_timestamp: f64,
    pub has_media: bool,
    pub possible_rt: bool,
    pub tweet_text: String,
    pub tweet_url: String,
}

impl Row for TweetRecord {
    const COLUMNS: &'static [&'static str] = &[
        "tweet_id",
        "tweet_date",
        "tweet_iso_date",
        "tweet_unix_timestamp",
        "has_media",
        "possible_rt",
        "tweet_text",
        "tweet_url",
    ];

    fn unix_timestamp(&self) -> f64 {
        self.tweet_unix_timestamp
    }
}

impl TweetRecord {
    pub fn extract(tweet: &RawTweet, options: &ExtractOptions) -> Result<Self, MalformedTweetError> {
        let header = TweetHeader::parse(tweet, options)?;
        let tweet_text = normalize_text(header.text.as_deref(), options.text_trailing_comma);

        Ok(Self {
            tweet_id: header.id,
            tweet_date: header.date,
            tweet_iso_date: header.iso_date,
            tweet_unix_timestamp: header.unix_timestamp,
            has_media: tweet.has_media(),
            possible_rt: header.possible_rt,
            tweet_text,
            tweet_url: header.url,
        })
    }
}

fn normalize_text(text: Option<&str>, trailing_comma: bool) -> String {
    let mut normalized = text.unwrap_or_default().replace('\n', " ");
    if trailing_comma {
        normalized.push(',');
    }
    normalized
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::archive::parse_archive;
    use crate::config::OutputZone;

    fn options() -> ExtractOptions {
        ExtractOptions {
            zone: OutputZone::east(0).unwrap(),
            ..Default::default()
        }
    }

    fn tweet(json: &str) -> RawTweet {
        let doc = format!("[{{\"tweet\": {}}}]", json);
        let entry = parse_archive(&doc).unwrap().remove(0);
        RawTweet::from_value(entry.tweet.as_ref().unwrap()).unwrap()
    }

    #[test]
    fn extract_tweet() {
        let raw = tweet(
            r#"{"id_str": "1050118621198921728", "created_at": "Wed Oct 10 20:19:24 +0000 2018",
                "full_text": "line one\nline two"}"#,
        );
        let record = TweetRecord::extract(&raw, &options()).unwrap();
        assert_eq!(
            TweetRecord {
                tweet_id: "1050118621198921728".to_owned(),
                tweet_date: "Wed Oct 10 20:19:24 +0000 2018".to_owned(),
                tweet_iso_date: "2018-10-10T20:19:24+00:00".to_owned(),
                tweet_unix_timestamp: 1539202764.0,
                has_media: false,
                possible_rt: false,
                tweet_text: "line one line two,".to_owned(),
                tweet_url: "https://twitter.com/whatever/status/1050118621198921728".to_owned(),
            },
            record
        );
    }

    #[test]
    fn possible_retweet() {
        let check = |text: &str| {
            let raw = tweet(&format!(
                r#"{{"id_str": "1", "created_at": "Wed Oct 10 20:19:24 +0000 2018", "full_text": {}}}"#,
                text
            ));
            TweetRecord::extract(&raw, &options()).unwrap().possible_rt
        };
        assert!(check(r#""RT @alice: hi""#));
        assert!(!check(r#""hi RT @alice""#));
        assert!(!check(r#""rt @alice""#));
        assert!(!check("null"));
    }

    #[test]
    fn retweet_checked_before_normalization() {
        let raw = tweet(
            r#"{"id_str": "1", "created_at": "Wed Oct 10 20:19:24 +0000 2018", "full_text": "RT\n@alice"}"#,
        );
        let record = TweetRecord::extract(&raw, &options()).unwrap();
        assert!(!record.possible_rt);
        assert_eq!("RT @alice,", record.tweet_text);
    }

    #[test]
    fn null_text() {
        let raw = tweet(
            r#"{"id_str": "1", "created_at": "Wed Oct 10 20:19:24 +0000 2018", "full_text": null}"#,
        );
        let record = TweetRecord::extract(&raw, &options()).unwrap();
        assert_eq!(",", record.tweet_text);
        assert!(!record.possible_rt);
    }

    #[test]
    fn without_trailing_comma() {
        let raw = tweet(
            r#"{"id_str": "1", "created_at": "Wed Oct 10 20:19:24 +0000 2018", "full_text": "a\nb"}"#,
        );
        let options = ExtractOptions {
            text_trailing_comma: false,
            ..options()
        };
        assert_eq!("a b", TweetRecord::extract(&raw, &options).unwrap().tweet_text);
    }

    #[test]
    fn has_media() {
        let raw = tweet(
            r#"{"id_str": "1", "created_at": "Wed Oct 10 20:19:24 +0000 2018", "full_text": "",
                "extended_entities": {"media": [{"id_str": "2", "type": "photo"}]}}"#,
        );
        assert!(TweetRecord::extract(&raw, &options()).unwrap().has_media);
    }

    #[test]
    fn custom_status_url() {
        let raw = tweet(
            r#"{"id_str": "9", "created_at": "Wed Oct 10 20:19:24 +0000 2018", "full_text": ""}"#,
        );
        let options = ExtractOptions {
            status_base_url: "https://x.com/i/status/".to_owned(),
            ..options()
        };
        assert_eq!(
            "https://x.com/i/status/9",
            TweetRecord::extract(&raw, &options).unwrap().tweet_url
        );
    }

    #[test]
    fn malformed() {
        let missing_id = tweet(r#"{"created_at": "Wed Oct 10 20:19:24 +0000 2018", "full_text": ""}"#);
        assert_eq!(
            Err(MalformedTweetError::MissingField("id_str")),
            TweetRecord::extract(&missing_id, &options())
        );

        let missing_text = tweet(r#"{"id_str": "1", "created_at": "Wed Oct 10 20:19:24 +0000 2018"}"#);
        assert_eq!(
            Err(MalformedTweetError::MissingField("full_text")),
            TweetRecord::extract(&missing_text, &options())
        );

        let bad_date = tweet(r#"{"id_str": "1", "created_at": "yesterday", "full_text": ""}"#);
        assert!(matches!(
            TweetRecord::extract(&bad_date, &options()),
            Err(MalformedTweetError::InvalidDate { .. })
        ));
    }
}
