mod tests {
    mod ff3_1 {
        use fpe3::ff3_1::FF3_1;
        use fpe3::result::Result;

        fn parse_hex(s: &str) -> Vec<u8> {
            hex::decode(s).unwrap()
        }

        fn test_ff3_1(
            k: &str,
            t: &str,
            pt: &str,
            ct: &str,
            r: usize,
            opt_a: Option<&str>,
        ) -> Result<()> {
            let key = parse_hex(k);
            let twk = parse_hex(t);

            let ff3_1 = FF3_1::new(&key, Some(&twk), r, opt_a)?;

            let out = ff3_1.encrypt(pt, None)?;
            assert!(ct == out, "encrypt: \"{}\" != \"{}\"", ct, out);

            let out = ff3_1.decrypt(ct, None)?;
            assert!(pt == out, "decrypt: \"{}\" != \"{}\"", pt, out);

            assert!(ct == fpe3::ff3_1::encrypt(&key, Some(&twk), pt, r, opt_a)?);
            assert!(pt == fpe3::ff3_1::decrypt(&key, Some(&twk), ct, r, opt_a)?);

            Ok(())
        }

        // the original FF3 sample set uses 8-byte tweaks, so it runs with
        // legacy tweaks enabled
        fn test_ff3_legacy(
            k: &str,
            t: &str,
            pt: &str,
            ct: &str,
            r: usize,
            opt_a: Option<&str>,
        ) -> Result<()> {
            let key = parse_hex(k);
            let twk = parse_hex(t);

            let ff3 = FF3_1::with_legacy_tweaks(&key, Some(&twk), r, opt_a)?;

            let out = ff3.encrypt(pt, None)?;
            assert!(ct == out, "encrypt: \"{}\" != \"{}\"", ct, out);

            let out = ff3.decrypt(ct, None)?;
            assert!(pt == out, "decrypt: \"{}\" != \"{}\"", pt, out);

            Ok(())
        }

        const NIST_KEY_128: &str = "EF4359D8D580AA4F7F036D6F04FC6A94";
        const NIST_KEY_192: &str =
            "EF4359D8D580AA4F7F036D6F04FC6A942B7E151628AED2A6";
        const NIST_KEY_256: &str =
            "EF4359D8D580AA4F7F036D6F04FC6A942B7E151628AED2A6ABF7158809CF4F3C";

        #[test]
        fn nist_sample_1() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_128,
                "D8E7920AFA330A73",
                "890121234567890000",
                "750918814058654607",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_2() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_128,
                "9A768A92F60E12D8",
                "890121234567890000",
                "018989839189395384",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_3() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_128,
                "D8E7920AFA330A73",
                "89012123456789000000789000000",
                "48598367162252569629397416226",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_4() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_128,
                "0000000000000000",
                "89012123456789000000789000000",
                "34695224821734535122613701434",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_5() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_128,
                "9A768A92F60E12D8",
                "0123456789abcdefghi",
                "g2pk40i992fn20cjakb",
                26,
                Some("0123456789abcdefghijklmnop"),
            )
        }

        #[test]
        fn nist_sample_6() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_192,
                "D8E7920AFA330A73",
                "890121234567890000",
                "646965393875028755",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_7() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_192,
                "9A768A92F60E12D8",
                "890121234567890000",
                "961610514491424446",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_8() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_192,
                "D8E7920AFA330A73",
                "89012123456789000000789000000",
                "53048884065350204541786380807",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_9() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_192,
                "0000000000000000",
                "89012123456789000000789000000",
                "98083802678820389295041483512",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_10() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_192,
                "9A768A92F60E12D8",
                "0123456789abcdefghi",
                "i0ihe2jfj7a9opf9p88",
                26,
                Some("0123456789abcdefghijklmnop"),
            )
        }

        #[test]
        fn nist_sample_11() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_256,
                "D8E7920AFA330A73",
                "890121234567890000",
                "922011205562777495",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_12() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_256,
                "9A768A92F60E12D8",
                "890121234567890000",
                "504149865578056140",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_13() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_256,
                "D8E7920AFA330A73",
                "89012123456789000000789000000",
                "04344343235792599165734622699",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_14() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_256,
                "0000000000000000",
                "89012123456789000000789000000",
                "30859239999374053872365555822",
                10,
                None,
            )
        }

        #[test]
        fn nist_sample_15() -> Result<()> {
            test_ff3_legacy(
                NIST_KEY_256,
                "9A768A92F60E12D8",
                "0123456789abcdefghi",
                "p0b2godfja9bwlmgx55",
                26,
                Some("0123456789abcdefghijklmnop"),
            )
        }

        #[test]
        fn acvp1() -> Result<()> {
            test_ff3_1(
                "ad41ec5d2356deae53ae76f50b4ba6d2",
                "cf29da1e18d970",
                "6520935496",
                "4716569208",
                10,
                None,
            )
        }

        #[test]
        fn acvp2() -> Result<()> {
            test_ff3_1(
                "3c0abb8c4d50528320ed6ef4f536371c",
                "2e0b7ee01c1370",
                "37411281822299620587806308530316674537844784195073078382",
                "45217408528208365340847148215470453887037524494034613315",
                10,
                None,
            )
        }

        #[test]
        fn acvp3() -> Result<()> {
            test_ff3_1(
                "f0097594805cf9b83b865ac2e86aaa3b",
                "a864bfdb7ab3e4",
                "884423490276892452986545",
                "886740195115224033771281",
                10,
                None,
            )
        }

        #[test]
        fn acvp4() -> Result<()> {
            test_ff3_1(
                "a4d59150ba523929f2536e22dcd9833a",
                "c618e4b9f102a9",
                "5121915885157704276490198331789119695462135673546462",
                "8700695822600163129327075842807189794897935821179979",
                10,
                None,
            )
        }

        #[test]
        fn acvp5() -> Result<()> {
            test_ff3_1(
                "65aec32cd5005e9d4fe0337d750f8889",
                "22566b02ce2b29",
                "579835153593770625247573877144356016354",
                "139570038859733375828972899639612707646",
                10,
                None,
            )
        }

        #[test]
        fn acvp6() -> Result<()> {
            test_ff3_1(
                "da0c3307fd184c1e47ff9b8acfd75305",
                "d9f1abd9c7ce64",
                "16554083965640402",
                "92429329291203011",
                10,
                None,
            )
        }

        #[test]
        fn acvp7() -> Result<()> {
            test_ff3_1(
                "96040c3bd28cacf5bbc104e17b71c292",
                "75a8902a2c33ab",
                "673355560820242081637314985809466",
                "978822369712766543147569600748825",
                10,
                None,
            )
        }

        #[test]
        fn acvp8() -> Result<()> {
            test_ff3_1(
                "47d6fd007e50024240b5d502db5b4a6a",
                "d3399bf93cc10c",
                "3136368918758657833514782148219054962724377646545",
                "8465961639246937993407777533030559401101453326524",
                10,
                None,
            )
        }

        #[test]
        fn acvp9() -> Result<()> {
            test_ff3_1(
                "a84bb554854dcab9cbfd9e298001518c",
                "7a773172c3f0f1",
                "082360355025",
                "901934302943",
                10,
                None,
            )
        }

        #[test]
        fn acvp10() -> Result<()> {
            test_ff3_1(
                "a00fcedf1ce6e35cf9097e98dc4d284d",
                "006985bc0e672c",
                "63987540055130890395",
                "73110711860320595989",
                10,
                None,
            )
        }

        #[test]
        fn roundtrip_every_length() -> Result<()> {
            let key = parse_hex("ef4359d8d580aa4f7f036d6f04fc6a94");
            let twk = [7u8; 7];
            let ff = FF3_1::new(&key, Some(&twk), 10, None)?;

            for n in ff.min_text_len()..=ff.max_text_len() {
                let pt: String = (0..n)
                    .map(|i| char::from(b'0' + (i % 10) as u8))
                    .collect();
                let ct = ff.encrypt(&pt, None)?;
                assert_eq!(ct.chars().count(), n);
                assert!(ct.chars().all(|c| c.is_ascii_digit()));
                assert_eq!(ff.decrypt(&ct, None)?, pt);
            }
            Ok(())
        }

        #[test]
        fn tweak_sensitivity() -> Result<()> {
            let key = parse_hex("ad41ec5d2356deae53ae76f50b4ba6d2");
            let twk = parse_hex("cf29da1e18d970");
            let ff = FF3_1::new(&key, None, 10, None)?;
            let pt = "0123456789012345";
            let base = ff.encrypt(pt, Some(&twk))?;

            for byte in 0..twk.len() {
                for bit in 0..8 {
                    let mut flipped = twk.clone();
                    flipped[byte] ^= 1 << bit;
                    let ct = ff.encrypt(pt, Some(&flipped))?;
                    assert_ne!(
                        ct, base,
                        "tweak bit {} of byte {} did not matter",
                        bit, byte
                    );
                }
            }
            Ok(())
        }

        #[test]
        fn key_sensitivity() -> Result<()> {
            let key = parse_hex("ad41ec5d2356deae53ae76f50b4ba6d2");
            let twk = [0u8; 7];
            let pt = "0123456789012345";
            let base = FF3_1::new(&key, Some(&twk), 10, None)?.encrypt(pt, None)?;

            for byte in 0..key.len() {
                for bit in 0..8 {
                    let mut flipped = key.clone();
                    flipped[byte] ^= 1 << bit;
                    let ct =
                        FF3_1::new(&flipped, Some(&twk), 10, None)?.encrypt(pt, None)?;
                    assert_ne!(
                        ct, base,
                        "key bit {} of byte {} did not matter",
                        bit, byte
                    );
                }
            }
            Ok(())
        }

        #[test]
        fn text_length_limits() -> Result<()> {
            let ff = FF3_1::new(&[0u8; 16], Some(&[0u8; 7]), 10, None)?;
            assert!(ff.encrypt("12345", None).is_err());
            assert!(ff.encrypt(&"9".repeat(56), None).is_ok());
            assert!(ff.encrypt(&"9".repeat(57), None).is_err());
            Ok(())
        }

        #[test]
        fn formatting_characters_survive() -> Result<()> {
            let key = parse_hex("ef4359d8d580aa4f7f036d6f04fc6a94");
            let ff = FF3_1::new(&key, Some(&[1u8; 7]), 10, None)?;

            let pt = "012-345-6789";
            let ct = ff.encrypt(pt, None)?;
            assert_eq!(ct.chars().count(), pt.chars().count());
            assert_eq!(ct.chars().nth(3), Some('-'));
            assert_eq!(ct.chars().nth(7), Some('-'));
            assert!(ct
                .chars()
                .enumerate()
                .all(|(i, c)| if i == 3 || i == 7 {
                    c == '-'
                } else {
                    c.is_ascii_digit()
                }));
            assert_eq!(ff.decrypt(&ct, None)?, pt);
            Ok(())
        }

        #[test]
        fn large_radix_roundtrip() -> Result<()> {
            let key = parse_hex("ef4359d8d580aa4f7f036d6f04fc6a94");
            let ff = FF3_1::new(&key, Some(&[5u8; 7]), 62, None)?;
            let pt = "Firefly7Serenity9Alliance0";
            let ct = ff.encrypt(pt, None)?;
            assert_eq!(ct.chars().count(), pt.chars().count());
            assert!(ct.chars().all(|c| c.is_ascii_alphanumeric()));
            assert_eq!(ff.decrypt(&ct, None)?, pt);
            Ok(())
        }
    }
}
