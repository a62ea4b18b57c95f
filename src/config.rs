/// Payload shape of `InitializeMint`. Chosen once per deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InitializeMintLayout {
    /// `[0, decimals]`
    #[default]
    WithDecimals,
    /// `[0]`, decimals fixed by the deployment.
    Implicit { decimals: u8 },
}

/// Kind of token every mint of a deployment issues.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MintProfile {
    #[default]
    Fungible,
    /// Zero decimals, a single unit per mint. When the mint has a freeze
    /// authority the receiving account is frozen by the mint.
    NonTransferable,
}

/// Deployment-time settings of the program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgramConfig {
    pub initialize_mint_layout: InitializeMintLayout,
    pub mint_profile: MintProfile,
}

impl ProgramConfig {
    pub fn with_implicit_decimals(decimals: u8) -> Self {
        Self {
            initialize_mint_layout: InitializeMintLayout::Implicit { decimals },
            ..Self::default()
        }
    }

    /// Non-transferable NFT deployment: `[0]` initializes a 0-decimal mint.
    pub fn non_transferable() -> Self {
        Self {
            initialize_mint_layout: InitializeMintLayout::Implicit { decimals: 0 },
            mint_profile: MintProfile::NonTransferable,
        }
    }
}
