//! End-to-end BIP-32 vectors: seed-to-master derivation, path walking with
//! hardened and non-hardened segments, extended key import/export, and the
//! parity between private- and public-parent non-hardened derivation.

use btc_keys_core::{HDKey, KeyError, Network};

fn seed_1() -> Vec<u8> {
    hex::decode("000102030405060708090a0b0c0d0e0f").unwrap()
}

fn seed_2() -> Vec<u8> {
    hex::decode(
        "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a\
         29f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b4842",
    )
    .unwrap()
}

#[test]
fn master_and_derived_keys_match_bip32_test_vector_1() {
    let master = HDKey::from_seed(&seed_1(), Network::Bitcoin).unwrap();
    assert_eq!(
        master.extended_wif().unwrap(),
        "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi"
    );

    let m_0h = master.subkey_for_path("m/0H").unwrap();
    assert_eq!(
        m_0h.extended_wif().unwrap(),
        "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7"
    );
    assert_eq!(
        m_0h.extended_wif_public(),
        "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw"
    );

    let m_0h_1 = master.subkey_for_path("m/0H/1").unwrap();
    assert_eq!(
        m_0h_1.extended_wif().unwrap(),
        "xprv9wTYmMFdV23N2TdNG573QoEsfRrWKQgWeibmLntzniatZvR9BmLnvSxqu53Kw1UmYPxLgboyZQaXwTCg8MSY3H2EU4pWcQDnRnrVA1xe8fs"
    );

    let m_0h_1_2h = master.subkey_for_path("m/0h/1/2h").unwrap();
    assert_eq!(
        m_0h_1_2h.extended_wif().unwrap(),
        "xprv9z4pot5VBttmtdRTWfWQmoH1taj2axGVzFqSb8C9xaxKymcFzXBDptWmT7FwuEzG3ryjH4ktypQSAewRiNMjANTtpgP4mLTj34bhnZX7UiM"
    );

    let deep = master.subkey_for_path("m/0h/1/2h/2/1000000000").unwrap();
    assert_eq!(
        deep.extended_wif().unwrap(),
        "xprvA41z7zogVVwxVSgdKUHDy1SKmdb533PjDz7J6N6mV6uS3ze1ai8FHa8kmHScGpWmj4WggLyQjgPie1rFSruoUihUZREPSL39UNdE3BBDu76"
    );
    assert_eq!(
        deep.extended_wif_public(),
        "xpub6H1LXWLaKsWFhvm6RVpEL9P4KfRZSW7abD2ttkWP3SSQvnyA8FSVqNTEcYFgJS2UaFcxupHiYkro49S8yGasTvXEYBVPamhGW6cFJodrTHy"
    );
}

#[test]
fn master_matches_bip32_test_vector_2() {
    let master = HDKey::from_seed(&seed_2(), Network::Bitcoin).unwrap();
    assert_eq!(
        master.extended_wif().unwrap(),
        "xprv9s21ZrQH143K31xYSDQpPDxsXRTUcvj2iNHm5NUtrGiGG5e2DtALGdso3pGz6ssrdK4PFmM8NSpSBHNqPqm55Qn3LqFtT2emdEXVYsCzC2U"
    );

    // m/0/2147483647H/1/2147483646H/2
    let deep = master
        .subkey_for_path("m/0/2147483647h/1/2147483646h/2")
        .unwrap();
    assert_eq!(
        deep.extended_wif().unwrap(),
        "xprvA2nrNbFZABcdryreWet9Ea4LvTJcGsqrMzxHx98MMrotbir7yrKCEXw7nadnHM8Dq38EGfSh6dqA9QWTyefMLEcBYJUuekgW4BYPJcr9E7j"
    );
    assert_eq!(
        deep.extended_wif_public(),
        "xpub6FnCn6nSzZAw5Tw7cgR9bi15UV96gLZhjDstkXXxvCLsUXBGXPdSnLFbdpq8p9HmGsApME5hQTZ3emM2rnY5agb9rXpVGyy3bdW6EEgAtqt"
    );
}

#[test]
fn invalid_paths_are_rejected() {
    let master = HDKey::from_seed(&seed_2(), Network::Bitcoin).unwrap();
    assert!(matches!(
        master.subkey_for_path("m/0/"),
        Err(KeyError::InvalidPath(_))
    ));
    assert!(matches!(
        master.subkey_for_path("m/-1"),
        Err(KeyError::InvalidPath(_))
    ));
}

#[test]
fn extended_private_and_public_keys_round_trip_on_import() {
    let extkey = "xprv9z4pot5VBttmtdRTWfWQmoH1taj2axGVzFqSb8C9xaxKymcFzXBDptWmT7FwuEzG3ryjH4ktypQSAewRiNMjANTtpgP4mLTj34bhnZX7UiM";
    let imported = HDKey::from_extended(extkey).unwrap();
    assert_eq!(imported.extended_wif().unwrap(), extkey);

    let xpub = "xpub6D4BDPcP2GT577Vvch3R8wDkScZWzQzMMUm3PWbmWvVJrZwQY4VUNgqFJPMM3No2dFDFGTsxxpG5uJh7n7epu4trkrX7x7DogT5Uv6fcLW5";
    let imported_pub = HDKey::from_extended(xpub).unwrap();
    assert_eq!(imported_pub.extended_wif_public(), xpub);
    assert!(!imported_pub.is_private());
}

#[test]
fn imported_xpub_has_no_private_material() {
    let xpub = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
    let imported = HDKey::from_extended(xpub).unwrap();
    assert_eq!(
        imported.key().address(),
        "15mKKb2eos1hWa6tisdPwwDC1a5J1y9nma"
    );
    assert_eq!(
        imported.key().public_hex(),
        "0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2"
    );
    assert!(imported.key().wif().is_none());
    assert!(imported.key().private_hex().is_none());
}

#[test]
fn public_child_derivation_matches_private_child_addresses() {
    let xpub = HDKey::from_extended(
        "xpub6ASuArnXKPbfEVRpCesNx4P939HDXENHkksgxsVG1yNp9958A33qYoPiTN9QrJmWFa2jNLdK84bWmyqTSPGtApP8P7nHUYwxHPhqmzUyeFG",
    )
    .unwrap();
    assert_eq!(
        xpub.child_public(0).unwrap().key().address(),
        "1BvgsfsZQVtkLS69NvGF8rw6NZW2ShJQHr"
    );
    assert_eq!(
        xpub.child_public(8).unwrap().key().address(),
        "17JbSP83rPWmbdcdtiiTNqBE8MgGN8kmUk"
    );

    let xprv = HDKey::from_extended(
        "xprv9wTYmMFdV23N21MM6dLNavSQV7Sj7meSPXx6AV5eTdqqGLjycVjb115Ec5LgRAXscPZgy5G4jQ9csyyZLN3PZLxoM1h3BoPuEJzsgeypdKj",
    )
    .unwrap();
    assert_eq!(
        xprv.child_private(7).unwrap().key().wif().unwrap(),
        "KxABnXp7SiuWi218c14KkjEMV7SjcfXnvsWaveNVxWZU1Rwi8zNQ"
    );
}

#[test]
fn path_without_leading_m_sentinel_derives_hardened_segments() {
    let parent = HDKey::from_extended(
        "xprv9s21ZrQH143K31AgNK5pyVvW23gHnkBq2wh5aEk6g1s496M8ZMjxncCKZKgb5jZoY5eSJMJ2Vbyvi2hbmQnCuHBujZ2WXGTux1X2k9Krdtq",
    )
    .unwrap();
    assert_eq!(
        parent.subkey_for_path("3/2H").unwrap().extended_wif().unwrap(),
        "xprv9wTErTSu5AWGkDeUPmqBcbZWX1xq85ZNX9iQRQW9DXwygFp7iRGJo79dsVctcsCHsnZ3XU3DhsuaGZbDh8iDkBN45k67UKsJUXM1JfRCdn1"
    );
}

#[test]
fn testnet_extended_key_imports_and_derives_testnet_address() {
    let k = HDKey::from_extended(
        "tprv8ZgxMBicQKsPf2S18qpSypHPZBK7mdiwvXHPh5TSjGjm2pLacP4tEqVjLVyagTLLgSZK4YyBNb4eytBykE755KcL9YXAqPtfERNRfwRt54M",
    )
    .unwrap();
    assert_eq!(
        k.key().wif().unwrap(),
        "cPSokRrLueavzAmVBmAXwgALkumRNMN9pErvRLAXvx58NBJAkEYJ"
    );
    assert_eq!(
        k.extended_wif_public(),
        "tpubD6NzVbkrYhZ4YVTo2VV3PDwW8Cq3vxurVptAybVk9YY9sJbMEmtURL7bWgKxXSWSahXu6HbHkdpjBGzwYYkJmu2VmoeHuiTmzHZpJo8Cdpb"
    );
    assert_eq!(k.public().key().address(), "n4c8TKkqUmj3b8VJrTioiZuciyaCDRd6iE");
}

#[test]
fn nonhardened_path_gives_identical_addresses_from_private_or_public_parent() {
    let master = HDKey::from_seed(&seed_1(), Network::Bitcoin).unwrap();
    let xpub = master.public();

    for path in ["m/0/1", "m/5", "m/44/1/2"] {
        let via_private = master.subkey_for_path(path).unwrap().public().key().address();
        let via_public = xpub.subkey_for_path(path).unwrap().key().address();
        assert_eq!(via_private, via_public, "path {path} diverged");
    }
}
