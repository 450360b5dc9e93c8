use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::{String, Vec};
use log::debug;
use serde::Serialize;

use super::{
    Error,
    HttpResult,
    headers::{
        ContentHeaders,
        ContentType,
        HttpMethod,
        ResponseHeaders,
        TargetWriter as _,
        TextEncoding,
        find_content_length,
        parse_request_line,
        read_heading,
    },
};

const HEADER_BUFFER_SIZE: usize = 1024;
const BODY_BUFFER_SIZE: usize = 512;
const BODY_RX_CHUNK_SIZE: usize = 128;
const STREAM_CHUNK_SIZE: usize = 1024;
const PATH_MAX_LEN: usize = 64;

/// HTTP connection context
pub(crate) struct HttpConnection<'a> {
    pub method: HttpMethod,
    /// Request path without the query string, empty if it did not fit
    pub path: String<PATH_MAX_LEN>,

    socket: TcpSocket<'a>,
    content_length: u32,
    header_end: usize,
    header_buf: Vec<u8, HEADER_BUFFER_SIZE>,
    body_buf: Vec<u8, BODY_BUFFER_SIZE>,
}

impl<'a> HttpConnection<'a> {
    /// Read the request head from `socket`.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut header_buf = Vec::<u8, HEADER_BUFFER_SIZE>::new();
        header_buf
            .resize_default(HEADER_BUFFER_SIZE)
            .map_err(|()| Error::Parse)?;
        let (header_end, header_len) = read_heading(header_buf.as_mut_slice(), &mut socket).await?;
        if header_len == 0 {
            return Err(Error::Closed);
        }
        header_buf.truncate(header_len);

        // Body bytes that arrived with the head may not be UTF-8
        let header_str =
            core::str::from_utf8(&header_buf[..header_end]).map_err(|_| Error::Parse)?;
        let (method, raw_path, rest_headers) = parse_request_line(header_str).ok_or(Error::Parse)?;
        let content_length = find_content_length(rest_headers).unwrap_or(0);
        let path = String::try_from(raw_path).unwrap_or_default();
        debug!("http: {:?} {}", method, raw_path);

        Ok(Self {
            method,
            path,
            socket,
            content_length,
            header_end,
            header_buf,
            body_buf: Vec::new(),
        })
    }

    /// Get request method and path
    pub(crate) fn route(&self) -> (HttpMethod, &'_ str) {
        (self.method, self.path.as_str())
    }

    /// Write the headers to the connection
    pub(crate) async fn write_headers(&mut self, headers: &ResponseHeaders<'_>) -> HttpResult {
        self.header_buf.clear();
        headers.write_to(&mut self.header_buf)?;
        self.socket.write_all(self.header_buf.as_slice()).await?;
        Ok(())
    }

    /// Write the body to the connection
    pub(crate) async fn write_body(&mut self, body: &[u8]) -> HttpResult {
        for chunk in body.chunks(STREAM_CHUNK_SIZE) {
            self.socket.write_all(chunk).await?;
        }
        self.socket.flush().await?;
        Ok(())
    }

    /// Write an HTML page with `headers`
    pub(crate) async fn write_html(&mut self, headers: ResponseHeaders<'_>, html: &str) -> HttpResult {
        let content = ContentHeaders::new(ContentType::TextHtml)
            .with_text_encoding(TextEncoding::Utf8)
            .with_length(html.len());
        self.write_headers(&headers.with_content(content)).await?;
        self.write_body(html.as_bytes()).await
    }

    /// Write a short plain-text response
    pub(crate) async fn write_text(&mut self, headers: ResponseHeaders<'_>, text: &str) -> HttpResult {
        let content = ContentHeaders::new(ContentType::TextPlain).with_length(text.len());
        self.write_headers(&headers.with_content(content)).await?;
        self.write_body(text.as_bytes()).await
    }

    /// Write JSON to the connection
    ///
    /// Writes both headers and body.
    pub(crate) async fn write_json<T: Serialize>(&mut self, data: &T) -> HttpResult {
        self.body_buf.clear();
        self.body_buf
            .resize_default(BODY_BUFFER_SIZE)
            .map_err(|()| Error::TooLarge)?;
        let n = serde_json_core::to_slice(data, self.body_buf.as_mut_slice())
            .map_err(|_| Error::TooLarge)?;
        self.body_buf.truncate(n);
        let headers = ResponseHeaders::success()
            .with_content(ContentHeaders::new(ContentType::Json).with_length(n));

        self.write_headers(&headers).await?;
        self.socket.write_all(self.body_buf.as_slice()).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Write a `302 Found` to `location`
    pub(crate) async fn redirect(&mut self, location: &str) -> HttpResult {
        self.write_headers(&ResponseHeaders::redirect(location)).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Read the request body
    pub(crate) async fn read_body(&mut self) -> Result<&[u8], Error> {
        if self.content_length == 0 {
            return Err(Error::NoData);
        }
        let content_length = self.content_length as usize;
        if content_length > BODY_BUFFER_SIZE {
            return Err(Error::TooLarge);
        }

        self.body_buf.clear();
        let received = self.header_buf.get(self.header_end..).unwrap_or_default();
        self.body_buf
            .extend_from_slice(&received[..received.len().min(content_length)])
            .map_err(|()| Error::TooLarge)?;

        while self.body_buf.len() < content_length {
            let mut chunk = [0u8; BODY_RX_CHUNK_SIZE];
            let wanted = (content_length - self.body_buf.len()).min(BODY_RX_CHUNK_SIZE);
            let n = self.socket.read(&mut chunk[..wanted]).await?;
            if n == 0 {
                return Err(Error::Closed);
            }
            self.body_buf
                .extend_from_slice(&chunk[..n])
                .map_err(|()| Error::TooLarge)?;
        }

        Ok(self.body_buf.as_slice())
    }

    /// Close the write half and wait until everything has been sent
    pub(crate) async fn close(mut self) {
        self.socket.close();
        let _ = self.socket.flush().await;
    }
}
