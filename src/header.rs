//! Well-known HTTP header names.
//!
//! Header names in fletch are plain strings; the constants here cover the
//! names the crate itself reads or writes, so callers can avoid typos
//! without pulling in a full header-name type.

macro_rules! standard_headers {
    (
        $(
            $(#[$docs:meta])*
            ($konst:ident, $name:literal);
        )+
    ) => {
        $(
            $(#[$docs])*
            pub const $konst: &str = $name;
        )+
    }
}

standard_headers! {
    /// Advertises which content types the client is able to understand.
    (ACCEPT, "accept");
    /// Advertises which content encodings the client is able to understand.
    (ACCEPT_ENCODING, "accept-encoding");
    /// Contains the credentials to authenticate a user agent with a server.
    (AUTHORIZATION, "authorization");
    /// Indicates if the content is expected to be displayed inline, or as
    /// an attachment. Also used for each part of a multipart body.
    (CONTENT_DISPOSITION, "content-disposition");
    /// Lists any encodings that have been applied to the message payload.
    (CONTENT_ENCODING, "content-encoding");
    /// Indicates the size of the message body sent to the recipient.
    (CONTENT_LENGTH, "content-length");
    /// Indicates the media type of the message body.
    (CONTENT_TYPE, "content-type");
    /// Indicates the URL to redirect a page to.
    (LOCATION, "location");
    /// Identifies the client software originating the request.
    (USER_AGENT, "user-agent");
}
