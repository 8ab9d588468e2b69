use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Every bonus a hand can earn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BonusCategory {
    // 88
    GreatThreeDragons,
    GreatFourWinds,
    AllOdd,
    HeavenlyDragon,
    ConsecutivePairs,
    NoComposites,
    ThirteenOrphans,
    FourIdentical,
    FourQuadruples,
    EightImmortals,
    // 64
    AllPowersOfTwo,
    PowerFlush,
    TwoIdenticalPairs,
    // 48
    AllTwoDigit,
    ThreeQuadruples,
    ThreeIdentical,
    AllMultiples,
    AllRare,
    // 32
    LittleThreeDragons,
    EarthDragon,
    LittleFourWinds,
    FirstTurnWin,
    // 24
    FourImmortals,
    EightPairs,
    AllSingleDigit,
    AllTriples,
    // 16
    AllComposite,
    AllEven,
    LastTileWin,
    // 12
    AdditionFlush,
    FourGates,
    MultiplicationFlush,
    // 8
    OneIdenticalPair,
    AllWithRare,
    Conventional,
    NoBonusWin,
    AfterKongWin,
    RobbingKong,
    // 6
    NoTwos,
    SelfDrawnConcealed,
    // 4
    CommonTiles,
    Twins,
    FullyExposed,
    ConcealedQuadruple,
    Kong,
    // 2
    OperatorWait,
    Concealed,
    ExposedQuadruple,
    BonusTile,
    Power,
}

impl BonusCategory {
    /// Default points per occurrence.
    pub fn points(self) -> u32 {
        use BonusCategory::*;
        match self {
            GreatThreeDragons | GreatFourWinds | AllOdd | HeavenlyDragon | ConsecutivePairs
            | NoComposites | ThirteenOrphans | FourIdentical | FourQuadruples
            | EightImmortals => 88,
            AllPowersOfTwo | PowerFlush | TwoIdenticalPairs => 64,
            AllTwoDigit | ThreeQuadruples | ThreeIdentical | AllMultiples | AllRare => 48,
            LittleThreeDragons | EarthDragon | LittleFourWinds | FirstTurnWin => 32,
            FourImmortals | EightPairs | AllSingleDigit | AllTriples => 24,
            AllComposite | AllEven | LastTileWin => 16,
            AdditionFlush | FourGates | MultiplicationFlush => 12,
            OneIdenticalPair | AllWithRare | Conventional | NoBonusWin | AfterKongWin
            | RobbingKong => 8,
            NoTwos | SelfDrawnConcealed => 6,
            CommonTiles | Twins | FullyExposed | ConcealedQuadruple | Kong => 4,
            OperatorWait | Concealed | ExposedQuadruple | BonusTile | Power => 2,
        }
    }

    /// Lower categories this one already implies.
    pub fn subsumes(self) -> &'static [BonusCategory] {
        use BonusCategory::*;
        match self {
            GreatThreeDragons => &[ThreeQuadruples, LittleThreeDragons],
            FourQuadruples => &[ThreeQuadruples, ConcealedQuadruple, ExposedQuadruple],
            AllOdd => &[NoTwos],
            FourIdentical => &[ThreeIdentical, TwoIdenticalPairs, OneIdenticalPair],
            ConsecutivePairs => &[EightPairs, Concealed],
            HeavenlyDragon => &[EarthDragon, Concealed, AllWithRare, AllRare],
            EightImmortals => &[FourImmortals],
            PowerFlush => &[Power],
            TwoIdenticalPairs => &[OneIdenticalPair],
            ThreeQuadruples => &[ConcealedQuadruple, ExposedQuadruple],
            ThreeIdentical => &[TwoIdenticalPairs, OneIdenticalPair],
            AllMultiples => &[AllTriples],
            AllRare => &[AllWithRare],
            EarthDragon => &[Concealed, AllWithRare, AllRare],
            AdditionFlush => &[NoTwos],
            FourGates => &[ExposedQuadruple, ConcealedQuadruple, Power],
            SelfDrawnConcealed => &[Concealed],
            EightPairs => &[Concealed],
            Conventional => &[Concealed],
            _ => &[],
        }
    }

    /// Traditional table name, shown in reports.
    pub fn native_name(self) -> &'static str {
        use BonusCategory::*;
        match self {
            GreatThreeDragons => "大三元",
            GreatFourWinds => "大四喜",
            AllOdd => "奇一色",
            HeavenlyDragon => "天龙",
            ConsecutivePairs => "连八对",
            NoComposites => "无合数",
            ThirteenOrphans => "十三幺",
            FourIdentical => "四同式",
            FourQuadruples => "四刻子",
            EightImmortals => "八仙过海",
            AllPowersOfTwo => "全二幂",
            PowerFlush => "次一色",
            TwoIdenticalPairs => "两般高",
            AllTwoDigit => "全二位",
            ThreeQuadruples => "三刻子",
            ThreeIdentical => "三同式",
            AllMultiples => "全多倍",
            AllRare => "全彩",
            LittleThreeDragons => "小三元",
            EarthDragon => "地龙",
            LittleFourWinds => "小四喜",
            FirstTurnWin => "天胡",
            FourImmortals => "四仙过海",
            EightPairs => "八小对",
            AllSingleDigit => "全一位",
            AllTriples => "全三倍",
            AllComposite => "全合数",
            AllEven => "全偶数",
            LastTileWin => "海底捞月",
            AdditionFlush => "加一色",
            FourGates => "四门齐",
            MultiplicationFlush => "乘一色",
            OneIdenticalPair => "一般高",
            AllWithRare => "全带彩",
            Conventional => "传统麻将",
            NoBonusWin => "无番胡",
            AfterKongWin => "杠上开花",
            RobbingKong => "抢杠",
            NoTwos => "断二",
            SelfDrawnConcealed => "不求人",
            CommonTiles => "平胡",
            Twins => "鸳鸯",
            FullyExposed => "全求人",
            ConcealedQuadruple => "暗刻",
            Kong => "杠",
            OperatorWait => "听符号",
            Concealed => "门清",
            ExposedQuadruple => "明刻",
            BonusTile => "宝牌",
            Power => "次方",
        }
    }
}
