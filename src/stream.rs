use std::future::Future;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::Deserializer;

use crate::{Error, Result, StreamError, StreamResult, Tweet};

/// Incremental decoder for newline-delimited tweet records.
///
/// Bytes are [pushed](TweetDecoder::push) as they arrive; a record split
/// across pushes is held back until it is complete.
#[derive(Debug, Default)]
pub struct TweetDecoder {
    buffer: Vec<u8>,
}

impl TweetDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Decode the next complete record.
    ///
    /// `None` means more bytes are needed. Records are newline delimited:
    /// a line that does not hold one complete record is dropped and
    /// reported as [`StreamError::Decode`]; decoding may continue
    /// afterwards.
    pub fn next_tweet(&mut self) -> Option<StreamResult<Tweet>> {
        self.skip_whitespace();
        if self.buffer.is_empty() {
            return None;
        }

        let (result, consumed) = {
            let mut records = Deserializer::from_slice(&self.buffer).into_iter::<Tweet>();
            let result = records.next();
            (result, records.byte_offset())
        };
        match result {
            Some(Ok(tweet)) => {
                self.buffer.drain(..consumed);
                Some(Ok(tweet))
            }
            Some(Err(e)) => {
                // records never span lines; without a newline the record may
                // still be arriving
                let end = self.buffer.iter().position(|b| *b == b'\n')?;
                tracing::warn!(error = %e, discarded = end + 1, "dropping malformed record");
                self.buffer.drain(..=end);
                Some(Err(StreamError::Decode(e)))
            }
            None => None,
        }
    }

    /// Flush the decoder once the input has ended.
    ///
    /// Returns the last record if one is still buffered, or an error when
    /// the input stopped in the middle of a record.
    pub fn finish(&mut self) -> Option<StreamResult<Tweet>> {
        if let Some(item) = self.next_tweet() {
            return Some(item);
        }
        self.skip_whitespace();
        if self.buffer.is_empty() {
            return None;
        }

        let leftover = std::mem::take(&mut self.buffer);
        match serde_json::from_slice::<Tweet>(&leftover) {
            Ok(tweet) => Some(Ok(tweet)),
            Err(e) if e.is_eof() => Some(Err(StreamError::Truncated(leftover.len()))),
            Err(e) => Some(Err(StreamError::Decode(e))),
        }
    }

    /// Number of bytes held back.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    fn skip_whitespace(&mut self) {
        let start = self
            .buffer
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(self.buffer.len());
        self.buffer.drain(..start);
    }
}

/// Tweets read from a streaming response body.
#[derive(Debug)]
pub struct TweetStream {
    response: Response,
    decoder: TweetDecoder,
    finished: bool,
}

impl TweetStream {
    /// Wrap a response without inspecting its status.
    pub fn new(response: Response) -> Self {
        TweetStream {
            response,
            decoder: TweetDecoder::new(),
            finished: false,
        }
    }

    /// Wait for the next tweet.
    ///
    /// Returns `None` once the body has ended and every buffered record has
    /// been yielded. Keep-alive blank lines never surface.
    pub async fn next_tweet(&mut self) -> Option<Result<Tweet>> {
        loop {
            if self.finished {
                return self.decoder.finish().map(|r| r.map_err(Error::from));
            }
            if let Some(item) = self.decoder.next_tweet() {
                return Some(item.map_err(Error::from));
            }
            match self.response.chunk().await {
                Ok(Some(bytes)) => {
                    tracing::trace!(len = bytes.len(), "stream chunk");
                    self.decoder.push(&bytes);
                }
                Ok(None) => self.finished = true,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Add tweet_stream feature to reqwest::Response.
// this trait is sealed
#[async_trait(?Send)]
pub trait TweetReader: private::Sealed {
    async fn tweet_stream(self) -> Result<TweetStream>;
}

#[async_trait(?Send)]
impl TweetReader for Response {
    async fn tweet_stream(self) -> Result<TweetStream> {
        let status = self.status();
        if status != StatusCode::OK {
            tracing::debug!(%status, url = %self.url(), "stream refused");
            return Err(StreamError::Status(status).into());
        }
        Ok(TweetStream::new(self))
    }
}

/// Add tweet_stream feature to Future of reqwest::Response.
// this trait is also sealed
#[async_trait(?Send)]
pub trait TweetReaderFuture: private::SealedWrapper {
    async fn tweet_stream(self) -> Result<TweetStream>;
}

#[async_trait(?Send)]
impl<T, E> TweetReaderFuture for T
where
    T: Future<Output = std::result::Result<Response, E>>,
    E: Into<Error> + 'static,
{
    async fn tweet_stream(self) -> Result<TweetStream> {
        match self.await {
            Ok(resp) => resp.tweet_stream().await,
            Err(err) => Err(err.into()),
        }
    }
}

mod private {
    use std::future::Future;

    use reqwest::Response;

    use crate::Error;

    pub trait Sealed {}
    impl Sealed for Response {}
    pub trait SealedWrapper {}
    impl<T, E> SealedWrapper for T
    where
        T: Future<Output = Result<Response, E>>,
        E: Into<Error>,
    {
    }
}
