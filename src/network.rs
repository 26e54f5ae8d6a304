/// A recognized parameter set supplying version bytes for WIF, P2PKH
/// addresses, and BIP-32 extended keys.
///
/// `Network` selects version bytes only; it is not part of a key's
/// cryptographic identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Bitcoin,
    Testnet,
}

impl Network {
    pub fn wif_version(self) -> u8 {
        match self {
            Network::Bitcoin => 0x80,
            Network::Testnet => 0xEF,
        }
    }

    pub fn p2pkh_version(self) -> u8 {
        match self {
            Network::Bitcoin => 0x00,
            Network::Testnet => 0x6F,
        }
    }

    pub fn xprv_prefix(self) -> [u8; 4] {
        match self {
            Network::Bitcoin => [0x04, 0x88, 0xAD, 0xE4],
            Network::Testnet => [0x04, 0x35, 0x83, 0x94],
        }
    }

    pub fn xpub_prefix(self) -> [u8; 4] {
        match self {
            Network::Bitcoin => [0x04, 0x88, 0xB2, 0x1E],
            Network::Testnet => [0x04, 0x35, 0x87, 0xCF],
        }
    }

    pub fn from_wif_version(version: u8) -> Option<Network> {
        match version {
            0x80 => Some(Network::Bitcoin),
            0xEF => Some(Network::Testnet),
            _ => None,
        }
    }

    pub fn from_p2pkh_version(version: u8) -> Option<Network> {
        match version {
            0x00 => Some(Network::Bitcoin),
            0x6F => Some(Network::Testnet),
            _ => None,
        }
    }

    /// Returns the network and whether the prefix denotes a private
    /// (`xprv`/`tprv`) or public (`xpub`/`tpub`) extended key.
    pub fn from_extended_prefix(prefix: [u8; 4]) -> Option<(Network, bool)> {
        match prefix {
            p if p == Network::Bitcoin.xprv_prefix() => Some((Network::Bitcoin, true)),
            p if p == Network::Bitcoin.xpub_prefix() => Some((Network::Bitcoin, false)),
            p if p == Network::Testnet.xprv_prefix() => Some((Network::Testnet, true)),
            p if p == Network::Testnet.xpub_prefix() => Some((Network::Testnet, false)),
            _ => None,
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Bitcoin
    }
}
