pub const SOAP_ENCODING: &str = "http://schemas.xmlsoap.org/soap/encoding/";
pub const SOAP_HTTP_TRANSPORT: &str = "http://schemas.xmlsoap.org/soap/http";
pub const XML_SCHEMA: &str = "http://www.w3.org/2001/XMLSchema";
