use std::{fmt, str::FromStr};

use thiserror::Error;

/// Which kind of class the generator emits for each binding.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStyle {
    #[default]
    Client,
    Server,
    ServerInterface,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown import style '{0}', expected client, server or serverInterface")]
pub struct ParseStyleError(String);

impl FromStr for ImportStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" | "Client" => Ok(ImportStyle::Client),
            "server" | "Server" => Ok(ImportStyle::Server),
            "serverInterface" | "ServerInterface" => Ok(ImportStyle::ServerInterface),
            other => Err(ParseStyleError(other.to_owned())),
        }
    }
}

impl fmt::Display for ImportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStyle::Client => write!(f, "client"),
            ImportStyle::Server => write!(f, "server"),
            ImportStyle::ServerInterface => write!(f, "serverInterface"),
        }
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CodeGenerationOptions: u8 {
        /// `Begin`/`End` method pairs.
        const GENERATE_OLD_ASYNC = 0b0001;
        /// Event based `Async` methods with completion handlers.
        const GENERATE_NEW_ASYNC = 0b0010;
    }
}

bitflags::bitflags! {
    /// Features of the downstream code generator that operations may depend on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GeneratorSupport: u8 {
        const REFERENCE_PARAMETERS   = 0b0000_0001;
        const PARAMETER_ATTRIBUTES   = 0b0000_0010;
        const RETURN_TYPE_ATTRIBUTES = 0b0000_0100;
        const DECLARE_EVENTS         = 0b0000_1000;
        const DECLARE_DELEGATES      = 0b0001_0000;
    }
}

impl Default for CodeGenerationOptions {
    fn default() -> Self {
        CodeGenerationOptions::GENERATE_OLD_ASYNC
    }
}

impl fmt::Display for GeneratorSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .iter_names()
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join(" | ");

        write!(f, "{}", names)
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorInfo {
    pub name: String,
    pub supports: GeneratorSupport,
}

impl GeneratorInfo {
    pub fn new(name: &str, supports: GeneratorSupport) -> Self {
        Self {
            name: name.to_owned(),
            supports,
        }
    }

    pub fn supports(&self, feature: GeneratorSupport) -> bool {
        self.supports.contains(feature)
    }
}

impl Default for GeneratorInfo {
    fn default() -> Self {
        Self::new("default", GeneratorSupport::all())
    }
}

#[derive(Default, Debug, Clone)]
pub struct ImportOptions {
    pub style: ImportStyle,
    pub generation: CodeGenerationOptions,
    pub generator: GeneratorInfo,
    /// Restricts the import to one protocol importer, matched case-insensitively.
    pub protocol_name: Option<String>,
}

impl ImportOptions {
    pub fn with_style(mut self, style: ImportStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_generation(mut self, generation: CodeGenerationOptions) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_generator(mut self, generator: GeneratorInfo) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_protocol(mut self, protocol_name: &str) -> Self {
        self.protocol_name = Some(protocol_name.to_owned());
        self
    }

    /// Event based async methods need a client class and a generator that can
    /// declare both events and delegates.
    pub fn generates_new_async(&self) -> bool {
        self.style == ImportStyle::Client
            && self
                .generation
                .contains(CodeGenerationOptions::GENERATE_NEW_ASYNC)
            && self.generator.supports(
                GeneratorSupport::DECLARE_EVENTS | GeneratorSupport::DECLARE_DELEGATES,
            )
    }

    pub fn generates_old_async(&self) -> bool {
        self.style == ImportStyle::Client
            && self
                .generation
                .contains(CodeGenerationOptions::GENERATE_OLD_ASYNC)
    }
}
